//! Snapshot error types.

use crate::core::StateError;
use thiserror::Error;

/// Errors that can occur while encoding or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The decoded state is not valid for the rebuilt transition map
    #[error(transparent)]
    InvalidState(#[from] StateError),
}
