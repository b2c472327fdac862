//! Error type for the synchronization layer.

use json_delta::DeltaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("delta codec error: {0}")]
    Codec(#[from] DeltaError),
    #[error("envelope decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(String),
}
