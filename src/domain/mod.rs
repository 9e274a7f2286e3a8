//! # Domain Layer
//!
//! Protocol types and collaborator contracts for the game client.
//! Nothing here performs I/O.
//!
//! ## Structure
//!
//! - **entities**: envelopes, typed payloads, session state, roster
//! - **value_objects**: colours, tickets, game ids
//! - **ports**: traits for the judge transport, the presentation surface and
//!   the automated player

pub mod entities;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use ports::*;
pub use value_objects::*;
