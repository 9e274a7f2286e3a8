//! WebSocket Client
//!
//! Outbound WebSocket connections to the judge and the automated player.

pub mod transport;

pub use transport::{Inbound, WsTransport};
