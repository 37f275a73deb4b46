//! Snapshot and restore of a machine's current state.
//!
//! A snapshot carries only the current state. The transition map is never
//! encoded: whoever restores a snapshot rebuilds the map independently and
//! the decoded state is checked against it.

use crate::core::State;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable capture of a current state.
///
/// # Example
///
/// ```rust
/// use statekeeper::snapshot::Snapshot;
///
/// let snapshot = Snapshot::new("CLOSED".to_string());
/// let json = snapshot.to_json().unwrap();
///
/// let restored: Snapshot<String> = Snapshot::from_json(&json).unwrap();
/// assert_eq!(restored.state, "CLOSED");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// The captured current state
    pub state: S,
}

impl<S: State> Snapshot<S> {
    /// Capture `state` at the current format version.
    pub fn new(state: S) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state,
        }
    }

    /// Encode as human-readable JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Encode in the compact binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Decode from the binary format, rejecting unsupported versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub(crate) fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }
}
