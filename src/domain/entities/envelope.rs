//! Message envelope exchanged with the judge.
//!
//! An envelope is a JSON object carrying a string `type` discriminator plus
//! type-specific fields. Inbound envelopes are kept as the raw object so they
//! can be forwarded to the automated player byte-for-byte equivalent; typed
//! views are decoded on demand with [`Envelope::decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::value_objects::{Colour, GameId};
use crate::shared::error::{ClientError, Result};

/// Envelope discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageType {
    Registered,
    Ready,
    PendingGame,
    NotifyTurn,
    Notify,
    GameOver,
    Games,
    Connection,
    /// Anything the client does not act on.
    Other(String),
}

impl MessageType {
    /// Parse a wire discriminator. Unknown values map to `Other`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "REGISTERED" => Self::Registered,
            "READY" => Self::Ready,
            "PENDING_GAME" => Self::PendingGame,
            "NOTIFY_TURN" => Self::NotifyTurn,
            "NOTIFY" => Self::Notify,
            "GAME_OVER" => Self::GameOver,
            "GAMES" => Self::Games,
            "CONNECTION" => Self::Connection,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Ready => "READY",
            Self::PendingGame => "PENDING_GAME",
            Self::NotifyTurn => "NOTIFY_TURN",
            Self::Notify => "NOTIFY",
            Self::GameOver => "GAME_OVER",
            Self::Games => "GAMES",
            Self::Connection => "CONNECTION",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed JSON envelope. Always a JSON object with a string `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    /// Decode raw inbound text.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let map = value.as_object().ok_or(ClientError::NotAnObject)?;
        if !map.get("type").is_some_and(Value::is_string) {
            return Err(ClientError::MissingType);
        }
        Ok(Self(value))
    }

    /// Build an outgoing control envelope.
    pub fn outbound(message: &OutboundMessage) -> Result<Self> {
        Self::from_value(serde_json::to_value(message)?)
    }

    pub fn message_type(&self) -> MessageType {
        MessageType::from_wire(self.type_name())
    }

    /// Raw discriminator as received.
    pub fn type_name(&self) -> &str {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Decode the envelope into a typed payload view.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.0.clone())?)
    }

    /// Copy of this envelope with `key` set to `value`. The `type` field is
    /// never replaced.
    pub fn with_field(&self, key: &str, value: Value) -> Self {
        let mut copy = self.0.clone();
        if key != "type" {
            if let Some(map) = copy.as_object_mut() {
                map.insert(key.to_string(), value);
            }
        }
        Self(copy)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

/// Control envelopes sent to the judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    Join { colour: Colour, game_id: GameId },
    Spectate { game_id: GameId },
}
