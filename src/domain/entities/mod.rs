//! # Domain Entities
//!
//! Protocol objects the client receives, stores and sends.
//!
//! - **Envelope**: a typed JSON message, inbound or outbound
//! - **Payloads**: typed views over inbound envelopes
//! - **Session**: the retained REGISTERED message
//! - **Roster**: colours played by the automated player

mod envelope;
mod payloads;
mod roster;
mod session;

pub use envelope::{Envelope, MessageType, OutboundMessage};

pub use payloads::{
    ws_address, ConnectionPayload, GamesPayload, MoveKind, MoveOwner, NotifyPayload,
    NotifyTurnPayload, PendingGamePayload, PlayedMove, ReadyPayload, RegisteredPayload,
    TicketCounts, ValidMove,
};

pub use roster::{Partition, Roster};

pub use session::{Registration, SessionState};
