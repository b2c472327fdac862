//! Error type for the delta codec.

use thiserror::Error;

/// Failure modes of [`diff`](crate::diff) and [`patch`](crate::patch).
///
/// Any failure aborts the whole call. Mutation performed by `patch` before
/// the failure point is not rolled back; callers that need atomicity must
/// snapshot the value first.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeltaError {
    #[error("path to non-existent field: {0}")]
    PathNotFound(String),
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),
    #[error("cannot descend into non-container value at segment: {0}")]
    NotContainer(String),
    #[error("cannot apply '{tag}' patch: expected {expected}")]
    TypeMismatch { tag: char, expected: &'static str },
    #[error("unsupported diff tag: {0}")]
    UnsupportedTag(String),
    #[error("malformed path segment: {0}")]
    ParseError(String),
}
