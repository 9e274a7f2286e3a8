//! Application Startup
//!
//! Connects the transports, assembles the messenger and runs the inbound
//! loop until the judge goes away or the process is interrupted.

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::application::{Dispatch, GameMessenger};
use crate::config::Settings;
use crate::domain::{AutomatedPlayer, MessageType};
use crate::infrastructure::websocket::{Inbound, WsTransport};
use crate::presentation::{ConsoleSurface, SharedView};

/// Application instance
pub struct Application {
    messenger: GameMessenger,
    inbound: mpsc::UnboundedReceiver<Inbound>,
    view: SharedView,
    auto_join: bool,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let (mut judge, inbound) = WsTransport::new("judge");
        let judge_url = settings.judge.url();
        tokio::time::timeout(settings.session.connect_timeout(), judge.connect(&judge_url))
            .await
            .with_context(|| format!("Timed out connecting to judge at {}", judge_url))?
            .with_context(|| format!("Failed to connect to judge at {}", judge_url))?;

        let ai = if settings.ai.enabled {
            connect_ai(&settings).await
        } else {
            None
        };

        let surface = ConsoleSurface::with_selected_game(settings.session.spectate_game);
        let view = surface.view();

        let messenger = GameMessenger::new(
            settings.messenger_config(),
            Box::new(judge),
            Box::new(surface),
            ai,
        );

        Ok(Self {
            messenger,
            inbound,
            view,
            auto_join: settings.session.auto_join,
        })
    }

    /// Board state as last drawn by the console surface
    pub fn view(&self) -> SharedView {
        self.view.clone()
    }

    /// Process judge messages until the judge connection closes or Ctrl+C.
    ///
    /// # Errors
    ///
    /// Fails if a reconnect requested by the judge leaves the client with no
    /// open connection.
    pub async fn run_until_stopped(mut self) -> Result<()> {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                event = self.inbound.recv() => match event {
                    Some(Inbound::Text(raw)) => self.on_frame(&raw).await?,
                    Some(Inbound::Closed { connection_id }) => {
                        // A replaced connection may report its close after the
                        // new one is already open
                        if self.messenger.judge_connected() {
                            tracing::debug!(%connection_id, "Stale connection closed");
                        } else {
                            tracing::info!(%connection_id, "Judge connection closed");
                            break;
                        }
                    }
                    None => break,
                },
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn on_frame(&mut self, raw: &str) -> Result<()> {
        let result = match self.messenger.handle_message(raw).await {
            Ok(Dispatch::Handled(MessageType::Registered)) if self.auto_join => {
                self.messenger.send_join().await.map(|outcome| {
                    tracing::info!(
                        game_id = %outcome.game_id,
                        human = ?outcome.human,
                        automated = ?outcome.automated,
                        ai_notified = outcome.ai_delivery.is_sent(),
                        "Joined game"
                    )
                })
            }
            Ok(Dispatch::Handled(MessageType::Registered)) => {
                tracing::info!("Registered; session.auto_join is off, so JOIN waits for the embedder");
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_protocol_violation() => {
                tracing::warn!(error = %e, "Dropping malformed message");
                Ok(())
            }
            // A failed reconnect leaves nothing to read from
            Err(e) if e.is_connection_failure() && !self.messenger.judge_connected() => {
                Err(anyhow::Error::new(e).context("Lost the judge connection"))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to handle message");
                Ok(())
            }
        }
    }
}

/// Connect to the automated player. The session carries on without one if
/// it cannot be reached.
async fn connect_ai(settings: &Settings) -> Option<Box<dyn AutomatedPlayer>> {
    let url = settings.ai.url();
    let mut ai = WsTransport::send_only("ai");

    match tokio::time::timeout(settings.session.connect_timeout(), ai.connect(&url)).await {
        Ok(Ok(())) => Some(Box::new(ai)),
        Ok(Err(e)) => {
            tracing::warn!(address = %url, error = %e, "Automated player unavailable");
            None
        }
        Err(_) => {
            tracing::warn!(address = %url, "Timed out connecting to automated player");
            None
        }
    }
}
