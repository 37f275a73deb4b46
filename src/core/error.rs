//! Errors raised when a state or transition is rejected.

use super::state::State;
use thiserror::Error;

/// The two ways a request against a transition graph can fail.
///
/// States are carried by name so the error does not depend on the state type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// A referenced state is not a key of the transition map.
    #[error("State {state} is unknown. Known states: [{}]", .known.join(", "))]
    UnknownState { state: String, known: Vec<String> },

    /// The target is known but is not an outgoing edge of the current state.
    #[error(
        "Transitioning from state {from} to {to} is illegal. {}",
        describe_allowed(.from, .allowed)
    )]
    IllegalTransition {
        from: String,
        to: String,
        allowed: Vec<String>,
    },
}

impl StateError {
    pub(crate) fn unknown<'a, S, I>(state: &S, known: I) -> Self
    where
        S: State + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        StateError::UnknownState {
            state: state.name().to_string(),
            known: known.into_iter().map(|s| s.name().to_string()).collect(),
        }
    }

    pub(crate) fn illegal<'a, S, I>(from: &S, to: &S, allowed: I) -> Self
    where
        S: State + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        StateError::IllegalTransition {
            from: from.name().to_string(),
            to: to.name().to_string(),
            allowed: allowed.into_iter().map(|s| s.name().to_string()).collect(),
        }
    }

    /// Name of the state the error is about: the unknown state, or the
    /// rejected transition target.
    pub fn state(&self) -> &str {
        match self {
            StateError::UnknownState { state, .. } => state,
            StateError::IllegalTransition { to, .. } => to,
        }
    }
}

fn describe_allowed(from: &str, allowed: &[String]) -> String {
    if allowed.is_empty() {
        format!("There are no states which can be reached from {from}.")
    } else {
        format!(
            "Allowed states for this transition: [{}]",
            allowed.join(", ")
        )
    }
}
