//! Infrastructure Layer
//!
//! Network implementations of the domain ports:
//! - WebSocket client transport for the judge and the automated player

pub mod websocket;
