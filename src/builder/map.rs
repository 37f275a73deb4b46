//! Builder for constructing validated transition maps.

use crate::builder::error::BuildError;
use crate::core::{State, TransitionEntries, TransitionMap};
use std::collections::BTreeSet;

/// Builder for constructing transition maps with a fluent API.
///
/// Unlike [`TransitionMap::from_edges`], `build` rejects a state declared
/// twice and any edge whose target was never declared.
pub struct TransitionMapBuilder<S: State> {
    entries: Vec<(S, BTreeSet<S>)>,
}

impl<S: State> TransitionMapBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare a state and the states it may move to.
    pub fn state<T>(mut self, state: impl Into<S>, targets: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<S>,
    {
        let targets = targets.into_iter().map(Into::into).collect();
        self.entries.push((state.into(), targets));
        self
    }

    /// Declare a state with no outgoing edges.
    pub fn terminal(mut self, state: impl Into<S>) -> Self {
        self.entries.push((state.into(), BTreeSet::new()));
        self
    }

    /// Build the map.
    /// Returns an error on duplicate declarations or dangling edges.
    pub fn build(self) -> Result<TransitionMap<S>, BuildError> {
        let map = TransitionEntries(self.entries).into_map()?;
        map.validate()?;
        Ok(map)
    }
}

impl<S: State> Default for TransitionMapBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_closed_map() {
        let map = TransitionMapBuilder::<String>::new()
            .state("OPEN", ["CLOSED"])
            .state("CLOSED", ["LOCKED", "OPEN"])
            .state("LOCKED", ["CLOSED"])
            .build()
            .unwrap();

        assert_eq!(map.len(), 3);
        assert!(map.targets(&"CLOSED".to_string()).unwrap().contains("LOCKED"));
    }

    #[test]
    fn terminal_states_have_no_targets() {
        let map = TransitionMapBuilder::<String>::new()
            .state("RUNNING", ["DONE"])
            .terminal("DONE")
            .build()
            .unwrap();

        assert!(map.targets(&"DONE".to_string()).unwrap().is_empty());
    }

    #[test]
    fn rejects_duplicate_states() {
        let result = TransitionMapBuilder::<String>::new()
            .state("A", ["B"])
            .terminal("B")
            .terminal("A")
            .build();

        assert_eq!(
            result,
            Err(BuildError::DuplicateState {
                state: "A".to_string()
            })
        );
    }

    #[test]
    fn rejects_undeclared_targets() {
        let result = TransitionMapBuilder::<String>::new()
            .state("A", ["B"])
            .build();

        assert!(matches!(result, Err(BuildError::DanglingEdge { .. })));
    }

    #[test]
    fn empty_builder_builds_empty_map() {
        let map = TransitionMapBuilder::<String>::new().build().unwrap();
        assert!(map.is_empty());
    }
}
