//! Application Services
//!
//! Session logic that coordinates the domain ports.
//!
//! ## Available Services
//!
//! - **GameMessenger**: routes inbound envelopes and mirrors them to the
//!   automated player
//! - **Join / Spectate**: outbound control messages and the reconnect that
//!   precedes them

pub mod join;
pub mod messenger;

pub use join::JoinOutcome;
pub use messenger::{Dispatch, GameMessenger, MessengerConfig, DEFAULT_CONNECT_TIMEOUT};
