//! Judge-assigned game identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a game hosted by the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl GameId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for GameId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
