//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **Colour**: player identifier (Mr X is `Black`)
//! - **Ticket**: transport ticket spent on a move
//! - **GameId**: judge-assigned game identifier

mod colour;
mod game_id;

pub use colour::*;
pub use game_id::*;
