//! Client Error Types
//!
//! Centralized error handling for the protocol client.

use std::time::Duration;

/// Client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Malformed envelope: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Envelope is not a JSON object")]
    NotAnObject,

    #[error("Envelope has no string `type` field")]
    MissingType,

    #[error("Join requested before any REGISTERED message was received")]
    NotRegistered,

    #[error("Connection to {address} did not open within {timeout:?}")]
    ConnectTimeout { address: String, timeout: Duration },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No game selected to spectate")]
    NoGameSelected,

    #[error("NOTIFY_TURN carried no valid moves")]
    EmptyValidMoves,

    #[error("Move of type {move_type} is missing `{field}`")]
    IncompleteMove {
        move_type: String,
        field: &'static str,
    },
}

impl ClientError {
    /// Whether the error came from the inbound message itself rather than
    /// from the local session or the network.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            ClientError::Decode(_)
                | ClientError::NotAnObject
                | ClientError::MissingType
                | ClientError::EmptyValidMoves
                | ClientError::IncompleteMove { .. }
        )
    }

    /// Whether the error came from opening or using a connection.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            ClientError::ConnectTimeout { .. } | ClientError::Transport(_)
        )
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
