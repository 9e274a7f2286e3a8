//! # Application Layer
//!
//! Message routing and the outbound handshake, written against the domain
//! ports only.

pub mod services;

pub use services::*;
