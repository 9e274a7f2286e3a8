//! # Yard Client Library
//!
//! Client-side protocol endpoint for a networked Scotland Yard game:
//! - Decodes JSON envelopes from the judge and drives a presentation surface
//! - Mirrors traffic for automated colours to a local AI player
//! - Joins and spectates games, re-pointing the judge connection as asked
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Protocol types, session state and collaborator traits
//! - **Application Layer**: The game messenger (routing and outbound messages)
//! - **Infrastructure Layer**: WebSocket transports
//! - **Presentation Layer**: Console surface
//!
//! ## Module Structure
//!
//! ```text
//! yard_client/
//! +-- config/         Configuration management
//! +-- domain/         Envelopes, payloads, session, ports
//! +-- application/    Game messenger
//! +-- infrastructure/ WebSocket transport
//! +-- presentation/   Console surface
//! +-- shared/         Common utilities (errors)
//! ```

// Configuration module
pub mod config;

// Domain layer - Protocol types and contracts
pub mod domain;

// Application layer - Message routing
pub mod application;

// Infrastructure layer - Network implementations
pub mod infrastructure;

// Presentation layer - Surfaces
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and runtime loop
pub mod startup;

// Telemetry and observability
pub mod telemetry;
