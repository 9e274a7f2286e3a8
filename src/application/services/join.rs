//! Outbound control messages.
//!
//! JOIN completes the handshake started by REGISTERED: the client moves to
//! the judge named in the registration and claims every colour it plays
//! itself. Colours on the automated player's roster are handed to the AI
//! channel in a single copy of the registration.

use crate::domain::{Colour, Delivery, Envelope, GameId, OutboundMessage};
use crate::shared::error::{ClientError, Result};

use super::messenger::GameMessenger;

/// What a join sequence sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub game_id: GameId,
    /// Colours a JOIN was sent for, in registration order.
    pub human: Vec<Colour>,
    /// Colours handed to the automated player.
    pub automated: Vec<Colour>,
    pub ai_delivery: Delivery,
}

impl GameMessenger {
    /// Join the game from the last REGISTERED message.
    ///
    /// # Errors
    ///
    /// `NotRegistered` if no REGISTERED message has arrived yet,
    /// `ConnectTimeout` if the judge connection does not open in time, or a
    /// transport error from sending a JOIN.
    pub async fn send_join(&mut self) -> Result<JoinOutcome> {
        let registration = self.session.registration()?.clone();
        let details = &registration.details;
        let partition = self.config.roster.partition(&details.colours);

        self.reconnect(&details.address()).await?;

        for &colour in &partition.human {
            let join = Envelope::outbound(&OutboundMessage::Join {
                colour,
                game_id: details.game_id,
            })?;
            self.transport.send(&join)?;
            tracing::info!(game_id = %details.game_id, colour = %colour, "JOIN sent");
        }

        let ai_delivery = if partition.automated.is_empty() {
            Delivery::Skipped
        } else {
            let handover = registration
                .envelope
                .with_field("colours", serde_json::to_value(&partition.automated)?);
            self.send_to_ai(&handover)
        };

        Ok(JoinOutcome {
            game_id: details.game_id,
            human: partition.human,
            automated: partition.automated,
            ai_delivery,
        })
    }

    /// Ask the judge to let us watch `game_id`.
    pub fn send_spectate(&self, game_id: GameId) -> Result<()> {
        let spectate = Envelope::outbound(&OutboundMessage::Spectate { game_id })?;
        self.transport.send(&spectate)?;
        tracing::info!(game_id = %game_id, "SPECTATE sent");
        Ok(())
    }

    /// Re-point the judge connection and wait, bounded, for it to open.
    pub(super) async fn reconnect(&mut self, address: &str) -> Result<()> {
        let timeout = self.config.connect_timeout;
        tracing::info!(address, "Changing judge connection");

        tokio::time::timeout(timeout, self.transport.change_connection(address))
            .await
            .map_err(|_| ClientError::ConnectTimeout {
                address: address.to_string(),
                timeout,
            })??;

        tracing::debug!(address, "Judge connection open");
        Ok(())
    }
}
