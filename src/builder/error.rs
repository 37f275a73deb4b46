//! Build errors for transition maps.

use thiserror::Error;

/// Errors that can occur when building or validating a transition map.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("State {from} has a transition to unknown state {to}. Declare {to} before building")]
    DanglingEdge { from: String, to: String },

    #[error("State {state} is declared more than once")]
    DuplicateState { state: String },
}
