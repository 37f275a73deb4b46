//! Machine that validates transitions against a transition map.

use crate::core::{State, StateError, StateHistory, StateTransition, TransitionMap};
use crate::snapshot::{Snapshot, SnapshotError};
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Tracks a current state and only moves along edges of its transition map.
///
/// The map is shared and never changes after construction; the current state
/// is the only mutable part. Two machines are equal when they are in the
/// same current state, whatever their maps look like.
///
/// Transition history is off by default. [`with_history`](Self::with_history)
/// turns on a capped log of applied transitions.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::{StateError, TransitionMap};
/// use statekeeper::Machine;
///
/// let map: TransitionMap<String> = TransitionMap::from_edges([
///     ("OPEN", vec!["CLOSED"]),
///     ("CLOSED", vec!["LOCKED", "OPEN"]),
///     ("LOCKED", vec!["CLOSED"]),
/// ]);
///
/// let mut door = Machine::new(map, "OPEN".to_string()).unwrap();
///
/// assert!(matches!(
///     door.transition("LOCKED"),
///     Err(StateError::IllegalTransition { .. })
/// ));
///
/// door.transition("CLOSED").unwrap();
/// door.transition("LOCKED").unwrap();
/// assert_eq!(door.current(), "LOCKED");
/// ```
#[derive(Clone, Debug)]
pub struct Machine<S: State> {
    map: Arc<TransitionMap<S>>,
    current: S,
    history: Option<StateHistory<S>>,
}

impl<S: State> Machine<S> {
    /// Create a machine in `initial`.
    ///
    /// Fails with [`StateError::UnknownState`] if `initial` is not in the map.
    /// Edge closure of the map is not re-checked.
    pub fn new(map: TransitionMap<S>, initial: S) -> Result<Self, StateError> {
        Self::with_shared_map(Arc::new(map), initial)
    }

    /// Create a machine over a map already shared with other machines.
    pub fn with_shared_map(map: Arc<TransitionMap<S>>, initial: S) -> Result<Self, StateError> {
        map.ensure_known(&initial)?;
        Ok(Self {
            map,
            current: initial,
            history: None,
        })
    }

    /// Record applied transitions, keeping at most the latest `limit`.
    pub fn with_history(mut self, limit: usize) -> Self {
        self.history = Some(StateHistory::with_limit(limit));
        self
    }

    /// Get current state (pure)
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Move to `to`.
    ///
    /// Transitioning to the current state is always a silent no-op. Any
    /// other target must be a known state and an outgoing edge of the
    /// current state.
    pub fn transition(&mut self, to: impl Into<S>) -> Result<(), StateError> {
        let to = to.into();
        if to == self.current {
            trace!(state = self.current.name(), "already in requested state");
            return Ok(());
        }

        if let Err(err) = self.check_transition(&to) {
            debug!(
                from = self.current.name(),
                to = to.name(),
                reason = %err,
                "transition rejected"
            );
            return Err(err);
        }

        let from = std::mem::replace(&mut self.current, to);
        debug!(from = from.name(), to = self.current.name(), "transition applied");
        if let Some(history) = &mut self.history {
            history.record(StateTransition {
                from,
                to: self.current.clone(),
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    /// Whether [`transition`](Self::transition) would succeed, without moving.
    pub fn can_transition(&self, to: impl Into<S>) -> bool {
        let to = to.into();
        to == self.current || self.check_transition(&to).is_ok()
    }

    /// Whether the current state is any of `states`.
    ///
    /// Every supplied state is checked against the map before comparing, so
    /// an unknown state fails even when another one matches.
    pub fn is<I>(&self, states: I) -> Result<bool, StateError>
    where
        I: IntoIterator,
        I::Item: Into<S>,
    {
        let mut matched = false;
        for state in states {
            let state = state.into();
            self.map.ensure_known(&state)?;
            matched |= state == self.current;
        }
        Ok(matched)
    }

    /// All known states, independent of the current one.
    pub fn list(&self) -> impl Iterator<Item = &S> + '_ {
        self.map.states()
    }

    /// States reachable in one hop from the current state.
    ///
    /// The implicit self-transition is not included unless the map lists it.
    pub fn allowed(&self) -> &BTreeSet<S> {
        self.map.edges_of(&self.current)
    }

    /// States reachable in one hop from `from`.
    pub fn allowed_from(&self, from: impl Into<S>) -> Result<&BTreeSet<S>, StateError> {
        let from = from.into();
        self.map
            .targets(&from)
            .ok_or_else(|| StateError::unknown(&from, self.map.states()))
    }

    /// Whether the current state has no outgoing edges.
    pub fn is_terminal(&self) -> bool {
        self.allowed().is_empty()
    }

    /// The transition map this machine validates against.
    pub fn map(&self) -> &TransitionMap<S> {
        &self.map
    }

    /// Transitions applied since construction or the last restore, if
    /// history was enabled with [`with_history`](Self::with_history).
    pub fn history(&self) -> Option<&StateHistory<S>> {
        self.history.as_ref()
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> Snapshot<S> {
        Snapshot::new(self.current.clone())
    }

    /// Resume from a snapshot, bypassing adjacency but not membership.
    ///
    /// The snapshot's state must be a key of this machine's map. History is
    /// cleared because it described the abandoned timeline.
    pub fn restore(&mut self, snapshot: Snapshot<S>) -> Result<(), SnapshotError> {
        snapshot.check_version()?;
        if let Err(err) = self.map.ensure_known(&snapshot.state) {
            warn!(state = snapshot.state.name(), "refusing to restore unknown state");
            return Err(err.into());
        }
        self.current = snapshot.state;
        if let Some(history) = &mut self.history {
            history.clear();
        }
        Ok(())
    }

    fn check_transition(&self, to: &S) -> Result<(), StateError> {
        self.map.ensure_known(to)?;
        let allowed = self.allowed();
        if !allowed.contains(to) {
            return Err(StateError::illegal(&self.current, to, allowed));
        }
        Ok(())
    }
}

impl<S: State> PartialEq for Machine<S> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<S: State> Eq for Machine<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state_enum, transition_map};

    state_enum! {
        enum Step {
            Initial,
            First,
            Second,
            Third,
        }
    }

    fn default_machine() -> Machine<Step> {
        let map = TransitionMap::from_edges([
            (Step::Initial, vec![Step::First, Step::Second]),
            (Step::First, vec![Step::Second]),
            (Step::Second, vec![Step::First, Step::Third]),
            (Step::Third, vec![]),
        ]);
        Machine::new(map, Step::Initial).unwrap()
    }

    #[test]
    fn initial_state_is_active_on_construction() {
        let machine = default_machine();

        assert_eq!(machine.current(), &Step::Initial);
        assert!(machine.is([Step::Initial]).unwrap());
        assert!(machine.history().is_none());
    }

    #[test]
    fn construction_rejects_unknown_initial_state() {
        let map: TransitionMap<String> =
            TransitionMap::from_edges([("A", vec!["B"]), ("B", vec![])]);

        let err = Machine::new(map, "Z".to_string()).unwrap_err();
        assert!(matches!(err, StateError::UnknownState { ref state, .. } if state == "Z"));
    }

    #[test]
    fn can_transition_successfully_between_states() {
        let mut machine = default_machine();

        machine.transition(Step::First).unwrap();
        assert_eq!(machine.current(), &Step::First);

        machine.transition(Step::Second).unwrap();
        assert_eq!(machine.current(), &Step::Second);

        machine.transition(Step::Third).unwrap();
        assert_eq!(machine.current(), &Step::Third);
        assert!(machine.is_terminal());
    }

    #[test]
    fn transitioning_to_current_state_silently_succeeds() {
        let mut machine = default_machine().with_history(8);

        assert!(machine.transition(Step::Initial).is_ok());
        assert_eq!(machine.current(), &Step::Initial);
        assert!(machine.history().unwrap().is_empty());
    }

    #[test]
    fn terminal_state_accepts_self_transition() {
        let mut machine = default_machine();
        machine.transition(Step::Second).unwrap();
        machine.transition(Step::Third).unwrap();

        assert!(machine.transition(Step::Third).is_ok());
        assert!(machine.can_transition(Step::Third));
    }

    #[test]
    fn rejects_transition_to_unknown_state() {
        let map: TransitionMap<String> =
            TransitionMap::from_edges([("INITIAL", vec!["FIRST"]), ("FIRST", vec![])]);
        let mut machine = Machine::new(map, "INITIAL".to_string()).unwrap();

        let err = machine.transition("FOOBAR").unwrap_err();
        assert!(matches!(err, StateError::UnknownState { .. }));
        assert_eq!(machine.current(), "INITIAL");
    }

    #[test]
    fn rejects_transition_not_in_allowed_set() {
        let mut machine = default_machine();

        let err = machine.transition(Step::Third).unwrap_err();
        assert_eq!(
            err,
            StateError::IllegalTransition {
                from: "Initial".to_string(),
                to: "Third".to_string(),
                allowed: vec!["First".to_string(), "Second".to_string()],
            }
        );
        assert_eq!(machine.current(), &Step::Initial);
        assert!(!machine.can_transition(Step::Third));
    }

    #[test]
    fn is_matches_any_of_several_states() {
        let mut machine = default_machine();

        assert!(machine.is([Step::Initial, Step::First]).unwrap());
        machine.transition(Step::First).unwrap();
        assert!(machine.is([Step::Initial, Step::First]).unwrap());
        machine.transition(Step::Second).unwrap();
        assert!(!machine.is([Step::Initial, Step::First]).unwrap());
    }

    #[test]
    fn is_validates_every_state_before_matching() {
        let map: TransitionMap<String> =
            TransitionMap::from_edges([("INITIAL", vec!["FIRST"]), ("FIRST", vec![])]);
        let machine = Machine::new(map, "INITIAL".to_string()).unwrap();

        let err = machine.is(["INITIAL", "NOPE"]).unwrap_err();
        assert_eq!(err.state(), "NOPE");
    }

    #[test]
    fn list_returns_all_known_states() {
        let mut machine = default_machine();
        let expected = vec![Step::Initial, Step::First, Step::Second, Step::Third];

        assert_eq!(machine.list().cloned().collect::<Vec<_>>(), expected);
        machine.transition(Step::Second).unwrap();
        assert_eq!(machine.list().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn allowed_lists_targets_from_current_state() {
        let mut machine = default_machine();

        let allowed: Vec<Step> = machine.allowed().iter().copied().collect();
        assert_eq!(allowed, vec![Step::First, Step::Second]);

        machine.transition(Step::Second).unwrap();
        let allowed: Vec<Step> = machine.allowed().iter().copied().collect();
        assert_eq!(allowed, vec![Step::First, Step::Third]);
    }

    #[test]
    fn allowed_from_specified_state() {
        let machine = default_machine();

        let allowed: Vec<Step> = machine
            .allowed_from(Step::Second)
            .unwrap()
            .iter()
            .copied()
            .collect();
        assert_eq!(allowed, vec![Step::First, Step::Third]);
        assert_eq!(machine.allowed_from(Step::Initial).unwrap(), machine.allowed());
    }

    #[test]
    fn allowed_from_rejects_unknown_state() {
        let map: TransitionMap<String> = transition_map! { "A" => [] };
        let machine = Machine::new(map, "A".to_string()).unwrap();

        assert!(matches!(
            machine.allowed_from("B"),
            Err(StateError::UnknownState { .. })
        ));
    }

    #[test]
    fn equality_compares_current_state_only() {
        let small: TransitionMap<String> = transition_map! { "A" => [] };
        let large: TransitionMap<String> =
            TransitionMap::from_edges([("A", vec!["B"]), ("B", vec!["A"])]);

        let mut left = Machine::new(small, "A".to_string()).unwrap();
        let mut right = Machine::new(large, "A".to_string()).unwrap();
        assert_eq!(left, right);
        assert_eq!(right, left);

        right.transition("B").unwrap();
        assert_ne!(left, right);

        left.transition("A").unwrap();
        assert_ne!(left, right);
    }

    #[test]
    fn history_records_applied_transitions_only() {
        let mut machine = default_machine().with_history(8);

        machine.transition(Step::First).unwrap();
        machine.transition(Step::First).unwrap();
        let _ = machine.transition(Step::Initial);
        machine.transition(Step::Second).unwrap();

        let path = machine.history().unwrap().get_path();
        assert_eq!(path, vec![&Step::Initial, &Step::First, &Step::Second]);
    }

    #[test]
    fn history_is_not_kept_unless_enabled() {
        let map: TransitionMap<String> =
            TransitionMap::from_edges([("A", vec!["B"]), ("B", vec!["A"])]);
        let mut machine = Machine::new(map, "A".to_string()).unwrap();

        for _ in 0..1_000 {
            machine.transition("B").unwrap();
            machine.transition("A").unwrap();
        }

        assert!(machine.history().is_none());
        assert!(machine.clone().history().is_none());
    }

    #[test]
    fn history_is_capped_at_its_limit() {
        let map: TransitionMap<String> =
            TransitionMap::from_edges([("A", vec!["B"]), ("B", vec!["A"])]);
        let mut machine = Machine::new(map, "A".to_string()).unwrap().with_history(4);

        for _ in 0..1_000 {
            machine.transition("B").unwrap();
            machine.transition("A").unwrap();
        }

        let history = machine.history().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.get_path(), vec!["A", "B", "A", "B", "A"]);
        assert_eq!(machine.clone().history().unwrap().len(), 4);
    }

    #[test]
    fn transition_to_dangling_target_is_unknown() {
        let map: TransitionMap<String> = TransitionMap::from_edges([("A", vec!["B"])]);
        let mut machine = Machine::new(map, "A".to_string()).unwrap();

        let err = machine.transition("B").unwrap_err();
        assert_eq!(
            err,
            StateError::UnknownState {
                state: "B".to_string(),
                known: vec!["A".to_string()],
            }
        );
        assert!(!machine.can_transition("B"));
        assert_eq!(machine.current(), "A");
    }

    #[test]
    fn clones_share_the_map() {
        let machine = default_machine();
        let mut copy = machine.clone();
        copy.transition(Step::First).unwrap();

        assert!(Arc::ptr_eq(&machine.map, &copy.map));
        assert_eq!(machine.current(), &Step::Initial);
    }

    #[test]
    fn restore_jumps_to_known_state() {
        let mut machine = default_machine().with_history(8);
        machine.transition(Step::First).unwrap();

        machine.restore(Snapshot::new(Step::Third)).unwrap();

        assert_eq!(machine.current(), &Step::Third);
        let history = machine.history().unwrap();
        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(8));
    }

    #[test]
    fn restore_rejects_unknown_state() {
        let map: TransitionMap<String> = transition_map! { "A" => [] };
        let mut machine = Machine::new(map, "A".to_string()).unwrap();

        let err = machine.restore(Snapshot::new("GHOST".to_string())).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InvalidState(StateError::UnknownState { .. })
        ));
        assert_eq!(machine.current(), "A");
    }
}
