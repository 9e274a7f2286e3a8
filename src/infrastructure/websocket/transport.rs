//! WebSocket Transport
//!
//! One client connection at a time over `tokio-tungstenite`. Each connection
//! gets a writer task fed by an unbounded channel and a reader task that
//! pushes frames into an inbound channel shared by every connection the
//! transport ever opens, so re-pointing is invisible to whoever consumes it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

use crate::domain::{AutomatedPlayer, Envelope, Transport};
use crate::shared::error::{ClientError, Result};

/// Event delivered on the inbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    /// The peer closed the connection or it failed.
    Closed { connection_id: Uuid },
}

/// A live connection and its I/O tasks.
struct Link {
    id: Uuid,
    address: String,
    outbound: mpsc::UnboundedSender<Message>,
    open: Arc<AtomicBool>,
    reader: JoinHandle<()>,
}

impl Link {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        // Writer drains the close frame and exits once `outbound` is dropped
        let _ = self.outbound.send(Message::Close(None));
        self.reader.abort();
    }
}

/// WebSocket client transport.
pub struct WsTransport {
    name: &'static str,
    inbound: Option<mpsc::UnboundedSender<Inbound>>,
    link: Option<Link>,
}

impl WsTransport {
    /// Transport whose inbound frames are delivered on the returned receiver.
    pub fn new(name: &'static str) -> (Self, mpsc::UnboundedReceiver<Inbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transport = Self {
            name,
            inbound: Some(tx),
            link: None,
        };
        (transport, rx)
    }

    /// Send-only transport; inbound frames are logged and dropped.
    pub fn send_only(name: &'static str) -> Self {
        Self {
            name,
            inbound: None,
            link: None,
        }
    }

    /// Address of the current connection, if any.
    pub fn address(&self) -> Option<&str> {
        self.link.as_ref().map(|link| link.address.as_str())
    }

    pub fn connection_id(&self) -> Option<Uuid> {
        self.link.as_ref().map(|link| link.id)
    }

    pub fn is_open(&self) -> bool {
        self.link.as_ref().is_some_and(Link::is_open)
    }

    /// Close the current connection, if any.
    pub fn close(&mut self) {
        if let Some(link) = self.link.take() {
            tracing::debug!(
                transport = self.name,
                connection_id = %link.id,
                address = %link.address,
                "Closing connection"
            );
        }
    }

    /// Close the current connection and open one to `address`. Resolves once
    /// the WebSocket handshake has completed.
    pub async fn connect(&mut self, address: &str) -> Result<()> {
        self.close();

        let (socket, _response) = tokio_tungstenite::connect_async(address).await?;
        let (mut sink, mut stream) = socket.split();

        let id = Uuid::new_v4();
        let open = Arc::new(AtomicBool::new(true));
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        let name = self.name;

        // Spawn task to forward messages from channel to WebSocket
        tokio::spawn({
            let open = open.clone();
            async move {
                while let Some(msg) = rx.recv().await {
                    let closing = matches!(msg, Message::Close(_));
                    if let Err(e) = sink.send(msg).await {
                        tracing::debug!(transport = name, connection_id = %id, error = %e, "Send failed");
                        break;
                    }
                    if closing {
                        break;
                    }
                }
                open.store(false, Ordering::Release);
            }
        });

        let reader = tokio::spawn({
            let open = open.clone();
            let inbound = self.inbound.clone();
            async move {
                while let Some(frame) = stream.next().await {
                    match frame {
                        Ok(Message::Text(text)) => match &inbound {
                            Some(tx) => {
                                if tx.send(Inbound::Text(text)).is_err() {
                                    break;
                                }
                            }
                            None => {
                                tracing::trace!(transport = name, frame = %text, "Discarding inbound frame");
                            }
                        },
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {}
                        Err(e) => {
                            tracing::debug!(transport = name, connection_id = %id, error = %e, "WebSocket error");
                            break;
                        }
                    }
                }

                open.store(false, Ordering::Release);
                tracing::debug!(transport = name, connection_id = %id, "Connection closed");
                if let Some(tx) = &inbound {
                    let _ = tx.send(Inbound::Closed { connection_id: id });
                }
            }
        });

        tracing::info!(
            transport = self.name,
            connection_id = %id,
            address = %address,
            "Connection open"
        );

        self.link = Some(Link {
            id,
            address: address.to_string(),
            outbound: tx,
            open,
            reader,
        });
        Ok(())
    }

    /// Queue an envelope on the current connection.
    pub fn send_envelope(&self, envelope: &Envelope) -> Result<()> {
        let link = self
            .link
            .as_ref()
            .filter(|link| link.is_open())
            .ok_or_else(|| ClientError::Transport(format!("{} is not connected", self.name)))?;

        let text = envelope.to_text()?;
        link.outbound
            .send(Message::Text(text))
            .map_err(|_| ClientError::Transport(format!("{} writer has stopped", self.name)))?;

        tracing::trace!(
            transport = self.name,
            connection_id = %link.id,
            message_type = %envelope.type_name(),
            "Message out"
        );
        Ok(())
    }
}

#[async_trait]
impl Transport for WsTransport {
    fn send(&self, envelope: &Envelope) -> Result<()> {
        self.send_envelope(envelope)
    }

    async fn change_connection(&mut self, address: &str) -> Result<()> {
        self.connect(address).await
    }

    fn is_connected(&self) -> bool {
        self.is_open()
    }
}

impl AutomatedPlayer for WsTransport {
    fn send(&self, envelope: &Envelope) -> Result<()> {
        self.send_envelope(envelope)
    }

    fn is_connected(&self) -> bool {
        self.is_open()
    }
}
