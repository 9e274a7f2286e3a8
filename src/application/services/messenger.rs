//! Game Messenger
//!
//! Routes envelopes from the judge to the presentation surface and, for the
//! colours the automated player controls, mirrors them to the AI channel.

use std::time::Duration;

use crate::domain::{
    AutomatedPlayer, Colour, ConnectionPayload, Delivery, Envelope, GamesPayload, MessageType,
    MoveKind, NotifyPayload, NotifyTurnPayload, PendingGamePayload, PresentationSurface,
    ReadyPayload, Registration, Roster, SessionState, Ticket, Transport,
};
use crate::shared::error::{ClientError, Result};

/// Default time allowed for a new judge connection to open.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Static configuration injected into the messenger.
#[derive(Debug, Clone)]
pub struct MessengerConfig {
    /// Colours played by the automated player.
    pub roster: Roster,
    /// Colour whose moves are recorded in the ticket-history view.
    pub visible_colour: Colour,
    /// Upper bound on waiting for a reconnect to open.
    pub connect_timeout: Duration,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            roster: Roster::empty(),
            visible_colour: Colour::Black,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Result of routing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Handled(MessageType),
    /// Unrecognised discriminator, deliberately ignored.
    Ignored(String),
}

/// Client-side protocol endpoint.
///
/// Entry points run to completion one at a time; the runtime loop awaits
/// [`GameMessenger::handle_message`] before reading the next frame.
pub struct GameMessenger {
    pub(super) config: MessengerConfig,
    pub(super) transport: Box<dyn Transport>,
    pub(super) surface: Box<dyn PresentationSurface>,
    pub(super) ai: Option<Box<dyn AutomatedPlayer>>,
    pub(super) session: SessionState,
}

impl GameMessenger {
    pub fn new(
        config: MessengerConfig,
        transport: Box<dyn Transport>,
        surface: Box<dyn PresentationSurface>,
        ai: Option<Box<dyn AutomatedPlayer>>,
    ) -> Self {
        Self {
            config,
            transport,
            surface,
            ai,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether the judge connection is currently open.
    pub fn judge_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Decode raw text from the judge and dispatch it.
    pub async fn handle_message(&mut self, raw: &str) -> Result<Dispatch> {
        let envelope = Envelope::parse(raw)?;
        self.handle_envelope(envelope).await
    }

    /// Dispatch an already decoded envelope on its `type`.
    pub async fn handle_envelope(&mut self, envelope: Envelope) -> Result<Dispatch> {
        let message_type = envelope.message_type();
        tracing::debug!(message_type = %message_type, "Message in");

        match &message_type {
            MessageType::Registered => self.on_registered(envelope)?,
            MessageType::Ready => self.on_ready(&envelope)?,
            MessageType::PendingGame => self.on_pending_game(&envelope)?,
            MessageType::NotifyTurn => self.on_notify_turn(&envelope)?,
            MessageType::Notify => self.on_notify(&envelope)?,
            MessageType::GameOver => self.on_game_over(&envelope),
            MessageType::Games => self.on_games(&envelope)?,
            MessageType::Connection => self.on_connection(&envelope).await?,
            MessageType::Other(name) => {
                tracing::trace!(message_type = %name, "Ignoring unrecognised message");
                return Ok(Dispatch::Ignored(name.clone()));
            }
        }

        Ok(Dispatch::Handled(message_type))
    }

    fn on_registered(&mut self, envelope: Envelope) -> Result<()> {
        let registration = Registration::from_envelope(envelope)?;
        let game_id = registration.details.game_id;

        self.surface.show_game_id(game_id);
        if let Some(previous) = self.session.record_registration(registration) {
            tracing::debug!(
                previous_game_id = %previous.details.game_id,
                game_id = %game_id,
                "Registration replaced"
            );
        }

        tracing::info!(game_id = %game_id, "Registered for game");
        Ok(())
    }

    fn on_ready(&mut self, envelope: &Envelope) -> Result<()> {
        let ready = envelope.decode::<ReadyPayload>();
        if let Ok(ready) = &ready {
            self.surface.set_player_locations(&ready.locations);
            self.surface.set_player_tickets(&ready.tickets);
            self.surface
                .set_ticket_view(&ready.rounds, ready.current_round);
        }

        // The automated player gets the envelope even if it failed to decode here
        self.forward_to_ai(envelope);
        let ready = ready?;
        self.surface.set_setup_view_visible(false);

        tracing::info!(
            players = ready.colours.len(),
            current_round = ready.current_round,
            "Game ready"
        );
        Ok(())
    }

    fn on_pending_game(&mut self, envelope: &Envelope) -> Result<()> {
        let pending: PendingGamePayload = envelope.decode()?;
        self.surface.show_setup_message(&pending.waiting_message());
        Ok(())
    }

    fn on_notify_turn(&mut self, envelope: &Envelope) -> Result<()> {
        let turn: NotifyTurnPayload = envelope.decode()?;
        let colour = turn.mover().ok_or(ClientError::EmptyValidMoves)?;

        let automated = self.config.roster.contains(colour) && self.ai_connected();
        self.surface.start_turn(envelope, automated);
        if automated {
            self.send_to_ai(envelope);
        }

        tracing::debug!(colour = %colour, automated, "Turn started");
        Ok(())
    }

    fn on_notify(&mut self, envelope: &Envelope) -> Result<()> {
        let shown = self.show_move(envelope);

        // Every move, passes and undecodable ones included, goes to the
        // automated player.
        self.forward_to_ai(envelope);
        shown
    }

    fn show_move(&mut self, envelope: &Envelope) -> Result<()> {
        let notify: NotifyPayload = envelope.decode()?;
        let kind = notify.kind();

        if kind != MoveKind::Pass {
            let played = notify.mv.ok_or_else(|| ClientError::IncompleteMove {
                move_type: notify.move_type.clone(),
                field: "move",
            })?;

            match kind {
                MoveKind::Double => {
                    self.surface.remove_ticket(played.colour, Ticket::Double);
                }
                _ => {
                    let ticket = played.ticket.ok_or_else(|| ClientError::IncompleteMove {
                        move_type: notify.move_type.clone(),
                        field: "ticket",
                    })?;
                    let target = played.target.ok_or_else(|| ClientError::IncompleteMove {
                        move_type: notify.move_type.clone(),
                        field: "target",
                    })?;
                    self.surface.remove_ticket(played.colour, ticket);
                    self.surface.animate_player(played.colour, target);
                }
            }

            if played.colour == self.config.visible_colour {
                self.surface.update_ticket_view(played.ticket, played.target);
            }

            tracing::debug!(
                colour = %played.colour,
                move_type = %notify.move_type,
                "Move played"
            );
        }

        Ok(())
    }

    fn on_game_over(&mut self, envelope: &Envelope) {
        self.surface.set_game_over(envelope);
        self.forward_to_ai(envelope);
        tracing::info!("Game over");
    }

    fn on_games(&mut self, envelope: &Envelope) -> Result<()> {
        let games: GamesPayload = envelope.decode()?;
        self.surface.update_games_list(&games.games);
        Ok(())
    }

    async fn on_connection(&mut self, envelope: &Envelope) -> Result<()> {
        let target: ConnectionPayload = envelope.decode()?;
        let game_id = self
            .surface
            .selected_game()
            .ok_or(ClientError::NoGameSelected)?;

        self.reconnect(&target.address()).await?;
        self.send_spectate(game_id)
    }

    pub(super) fn ai_connected(&self) -> bool {
        self.ai.as_ref().is_some_and(|ai| ai.is_connected())
    }

    /// Forward to the automated player when it plays at least one colour.
    pub fn forward_to_ai(&self, envelope: &Envelope) -> Delivery {
        if self.config.roster.is_empty() {
            return Delivery::Skipped;
        }
        self.send_to_ai(envelope)
    }

    /// Fire-and-forget send to the AI channel. A missing or disconnected
    /// channel skips silently.
    pub(super) fn send_to_ai(&self, envelope: &Envelope) -> Delivery {
        let Some(ai) = self.ai.as_ref().filter(|ai| ai.is_connected()) else {
            tracing::trace!(message_type = %envelope.type_name(), "Automated player unavailable");
            return Delivery::Skipped;
        };

        match ai.send(envelope) {
            Ok(()) => {
                tracing::debug!(message_type = %envelope.type_name(), "Forwarded to automated player");
                Delivery::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to forward to automated player");
                Delivery::Skipped
            }
        }
    }
}
