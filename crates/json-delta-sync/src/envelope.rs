//! Wire envelope pairing a diff with a logical timestamp.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SyncError;

/// A transmitted delta: `{"time":<uint64>,"diff":<diff-value>}`.
///
/// The diff is an ordinary JSON value following the `"_t"` tag convention,
/// so the whole envelope serializes with the plain JSON text codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEnvelope {
    pub time: u64,
    pub diff: Value,
}

impl DiffEnvelope {
    pub fn new(time: u64, diff: Value) -> Self {
        Self { time, diff }
    }

    pub fn to_json(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(text)?)
    }
}
