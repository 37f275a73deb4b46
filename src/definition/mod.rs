//! Machine definitions loaded from configuration text.
//!
//! A definition pairs an initial state with a transition map so a lifecycle
//! can live in a JSON or YAML document instead of code:
//!
//! ```yaml
//! initial: OPEN
//! transitions:
//!   OPEN: [CLOSED]
//!   CLOSED: [LOCKED, OPEN]
//!   LOCKED: [CLOSED]
//! ```

mod error;

pub use error::DefinitionError;

use crate::core::{State, TransitionEntries, TransitionMap};
use crate::engine::Machine;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Initial state plus transition map, as found in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineDefinition<S: State> {
    pub initial: S,
    pub transitions: TransitionMap<S>,
}

impl<S: State> MachineDefinition<S> {
    /// Parse a definition from JSON.
    ///
    /// A state listed twice under `transitions` is a
    /// [`BuildError::DuplicateState`](crate::builder::BuildError::DuplicateState).
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let raw: RawDefinition<S> =
            serde_json::from_str(json).map_err(|e| DefinitionError::Parse(e.to_string()))?;
        raw.into_definition()
    }

    /// Parse a definition from YAML, with the same duplicate check as
    /// [`from_json`](Self::from_json).
    pub fn from_yaml(yaml: &str) -> Result<Self, DefinitionError> {
        let raw: RawDefinition<S> =
            serde_yaml::from_str(yaml).map_err(|e| DefinitionError::Parse(e.to_string()))?;
        raw.into_definition()
    }

    /// Encode the definition as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self).map_err(|e| DefinitionError::Encode(e.to_string()))
    }

    /// Check the map's edge closure and the initial state, then build a machine.
    pub fn into_machine(self) -> Result<Machine<S>, DefinitionError> {
        self.transitions.validate()?;
        debug!(
            initial = self.initial.name(),
            states = self.transitions.len(),
            "building machine from definition"
        );
        Ok(Machine::new(self.transitions, self.initial)?)
    }
}

/// Definition as written, before repeated states are rejected.
#[derive(Deserialize)]
#[serde(bound = "")]
struct RawDefinition<S: State> {
    initial: S,
    transitions: TransitionEntries<S>,
}

impl<S: State> RawDefinition<S> {
    fn into_definition(self) -> Result<MachineDefinition<S>, DefinitionError> {
        Ok(MachineDefinition {
            initial: self.initial,
            transitions: self.transitions.into_map()?,
        })
    }
}
