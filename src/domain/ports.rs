//! Collaborator contracts.
//!
//! The messenger never touches a socket or a screen directly; it talks to the
//! judge, the presentation surface and the automated player through these
//! traits. Implementations live in the infrastructure and presentation layers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::entities::{Envelope, TicketCounts};
use crate::domain::value_objects::{Colour, GameId, Location, Ticket};
use crate::shared::error::Result;

/// Connection to the judge.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send {
    /// Queue an envelope for delivery on the current connection.
    fn send(&self, envelope: &Envelope) -> Result<()>;

    /// Drop the current connection and connect to `address`. Resolves once
    /// the new connection is open.
    async fn change_connection(&mut self, address: &str) -> Result<()>;

    fn is_connected(&self) -> bool;
}

/// Sink for visual updates. Calls are fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationSurface: Send {
    fn show_game_id(&mut self, game_id: GameId);

    fn set_player_locations(&mut self, locations: &BTreeMap<Colour, Location>);

    fn set_player_tickets(&mut self, tickets: &TicketCounts);

    fn set_ticket_view(&mut self, rounds: &[bool], current_round: u32);

    fn set_setup_view_visible(&mut self, visible: bool);

    fn show_setup_message(&mut self, message: &str);

    fn remove_ticket(&mut self, colour: Colour, ticket: Ticket);

    fn animate_player(&mut self, colour: Colour, location: Location);

    /// Record a move in the shared ticket-history view.
    fn update_ticket_view(&mut self, ticket: Option<Ticket>, location: Option<Location>);

    fn update_games_list(&mut self, games: &[Value]);

    fn set_game_over(&mut self, result: &Envelope);

    fn start_turn(&mut self, turn: &Envelope, automated: bool);

    /// Game currently chosen for spectating, if any.
    fn selected_game(&self) -> Option<GameId>;
}

/// Channel to the locally-run automated player.
#[cfg_attr(test, mockall::automock)]
pub trait AutomatedPlayer: Send {
    fn send(&self, envelope: &Envelope) -> Result<()>;

    fn is_connected(&self) -> bool;
}

/// Outcome of a best-effort forward to the automated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No automated colours, no channel, or the channel is down.
    Skipped,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent)
    }
}
