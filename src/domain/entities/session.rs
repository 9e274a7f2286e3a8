//! Session state retained between messages.
//!
//! The only thing the client remembers across envelopes is the most recent
//! REGISTERED message, which the join sequence reads later.

use crate::domain::entities::{Envelope, RegisteredPayload};
use crate::shared::error::{ClientError, Result};

/// A stored REGISTERED envelope together with its decoded view.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub envelope: Envelope,
    pub details: RegisteredPayload,
}

impl Registration {
    pub fn from_envelope(envelope: Envelope) -> Result<Self> {
        let details = envelope.decode()?;
        Ok(Self { envelope, details })
    }
}

/// Per-connection session state.
#[derive(Debug, Default)]
pub struct SessionState {
    last_registration: Option<Registration>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored registration, returning the previous one.
    pub fn record_registration(&mut self, registration: Registration) -> Option<Registration> {
        self.last_registration.replace(registration)
    }

    /// The stored registration, or `NotRegistered` if none has arrived yet.
    pub fn registration(&self) -> Result<&Registration> {
        self.last_registration
            .as_ref()
            .ok_or(ClientError::NotRegistered)
    }

    pub fn is_registered(&self) -> bool {
        self.last_registration.is_some()
    }
}
