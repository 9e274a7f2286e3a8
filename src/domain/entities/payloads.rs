//! Typed views over inbound envelopes.
//!
//! Each struct decodes only the fields its handler reads; unknown fields are
//! ignored so the judge can extend messages without breaking the client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{Colour, GameId, Location, Ticket};

/// REGISTERED: the matchmaker placed us in a game hosted at `host:port`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredPayload {
    pub game_id: GameId,
    pub host: String,
    pub port: u16,
    pub colours: Vec<Colour>,
}

impl RegisteredPayload {
    pub fn address(&self) -> String {
        ws_address(&self.host, self.port)
    }
}

/// Ticket counts per player.
pub type TicketCounts = BTreeMap<Colour, BTreeMap<Ticket, u32>>;

/// READY: initial board state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadyPayload {
    pub locations: BTreeMap<Colour, Location>,
    pub tickets: TicketCounts,
    /// Per-round flag, true when Mr X surfaces that round.
    pub rounds: Vec<bool>,
    pub current_round: u32,
    #[serde(default)]
    pub colours: Vec<Colour>,
}

/// PENDING_GAME: players the game is still waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingGamePayload {
    pub opponents: Vec<String>,
}

impl PendingGamePayload {
    pub fn waiting_message(&self) -> String {
        format!("Waiting for: {}", self.opponents.join(","))
    }
}

/// Reference to the player a valid move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MoveOwner {
    pub colour: Colour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ValidMove {
    #[serde(rename = "move")]
    pub mv: MoveOwner,
}

/// NOTIFY_TURN: the moves available to whoever plays next.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotifyTurnPayload {
    pub valid_moves: Vec<ValidMove>,
}

impl NotifyTurnPayload {
    /// Colour of the player to move, taken from the first valid move.
    pub fn mover(&self) -> Option<Colour> {
        self.valid_moves.first().map(|m| m.mv.colour)
    }
}

/// Broad category of a played move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Pass,
    Double,
    Ticket,
}

impl MoveKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "MovePass" => Self::Pass,
            "MoveDouble" => Self::Double,
            _ => Self::Ticket,
        }
    }
}

/// The move carried by a NOTIFY. Double moves may omit `target` and `ticket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PlayedMove {
    pub colour: Colour,
    #[serde(default)]
    pub target: Option<Location>,
    #[serde(default)]
    pub ticket: Option<Ticket>,
}

/// NOTIFY: a move was played.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotifyPayload {
    pub move_type: String,
    #[serde(rename = "move", default)]
    pub mv: Option<PlayedMove>,
}

impl NotifyPayload {
    pub fn kind(&self) -> MoveKind {
        MoveKind::from_wire(&self.move_type)
    }
}

/// GAMES: games open for spectating.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GamesPayload {
    pub games: Vec<Value>,
}

/// CONNECTION: judge address to spectate on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionPayload {
    pub host: String,
    pub port: u16,
}

impl ConnectionPayload {
    pub fn address(&self) -> String {
        ws_address(&self.host, self.port)
    }
}

/// WebSocket address of a judge endpoint.
pub fn ws_address(host: &str, port: u16) -> String {
    format!("ws://{}:{}", host, port)
}
