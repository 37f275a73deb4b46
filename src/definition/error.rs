//! Error types for machine definitions.

use crate::builder::BuildError;
use crate::core::StateError;
use thiserror::Error;

/// Errors that can occur when loading a definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to parse machine definition: {0}")]
    Parse(String),

    #[error("Failed to encode machine definition: {0}")]
    Encode(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    State(#[from] StateError),
}
