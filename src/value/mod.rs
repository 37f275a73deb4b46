//! Self-contained state values.
//!
//! A [`StateValue`] carries its own transition map, supplied by a
//! [`MappedState`] implementation, so domain types can embed a lifecycle
//! field without passing a map around. Serializing the value writes only
//! the current state; deserializing rebuilds the map and checks the decoded
//! state against it.

use crate::core::{State, StateError, TransitionMap};
use crate::engine::Machine;
use crate::snapshot::{Snapshot, SnapshotError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

/// Supplies the fixed transition map and initial state of a lifecycle.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::TransitionMap;
/// use statekeeper::value::{MappedState, StateValue};
/// use statekeeper::{state_enum, transition_map};
///
/// state_enum! {
///     pub enum Door {
///         Open,
///         Closed,
///         Locked,
///     }
/// }
///
/// struct DoorLifecycle;
///
/// impl MappedState for DoorLifecycle {
///     type State = Door;
///
///     fn transition_map() -> TransitionMap<Door> {
///         transition_map! {
///             Door::Open => [Door::Closed],
///             Door::Closed => [Door::Locked, Door::Open],
///             Door::Locked => [Door::Closed],
///         }
///     }
///
///     fn initial_state() -> Door {
///         Door::Open
///     }
/// }
///
/// let mut door = StateValue::<DoorLifecycle>::new().unwrap();
/// door.transition(Door::Closed).unwrap();
/// assert!(door.is(Door::Closed).unwrap());
/// ```
pub trait MappedState {
    type State: State;

    /// The map of valid transitions. Every state must appear as a key.
    fn transition_map() -> TransitionMap<Self::State>;

    /// State a fresh value starts in.
    fn initial_state() -> Self::State;
}

/// A current state bound to the transition map of `D`.
pub struct StateValue<D: MappedState> {
    machine: Machine<D::State>,
    _lifecycle: PhantomData<fn() -> D>,
}

impl<D: MappedState> StateValue<D> {
    /// Create a value in `D`'s initial state.
    ///
    /// Fails if the initial state is missing from `D`'s own map.
    pub fn new() -> Result<Self, StateError> {
        let machine = Machine::new(D::transition_map(), D::initial_state())?;
        Ok(Self {
            machine,
            _lifecycle: PhantomData,
        })
    }

    /// Rebuild a value from a snapshot.
    ///
    /// The map is recomputed from `D` and the snapshot's state must be one
    /// of its keys.
    pub fn restore(snapshot: Snapshot<D::State>) -> Result<Self, SnapshotError> {
        let mut value = Self::new()?;
        value.machine.restore(snapshot)?;
        Ok(value)
    }

    /// Rebuild a value from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::restore(Snapshot::from_json(json)?)
    }

    /// Rebuild a value from a binary snapshot.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Self::restore(Snapshot::from_binary(bytes)?)
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> Snapshot<D::State> {
        self.machine.snapshot()
    }

    /// Encode the current state as a JSON snapshot.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        self.snapshot().to_json()
    }

    /// Encode the current state as a binary snapshot.
    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        self.snapshot().to_binary()
    }

    /// Returns the current state.
    pub fn get(&self) -> &D::State {
        self.machine.current()
    }

    /// Whether the current state is `state`.
    pub fn is(&self, state: impl Into<D::State>) -> Result<bool, StateError> {
        self.machine.is([state.into()])
    }

    /// Whether the current state is one of `states`.
    pub fn is_one_of<I>(&self, states: I) -> Result<bool, StateError>
    where
        I: IntoIterator,
        I::Item: Into<D::State>,
    {
        self.machine.is(states)
    }

    /// Transition to `to`, with the same rules as [`Machine::transition`].
    pub fn transition(&mut self, to: impl Into<D::State>) -> Result<(), StateError> {
        self.machine.transition(to)
    }

    /// States reachable in one hop from the current state.
    pub fn allowed(&self) -> &BTreeSet<D::State> {
        self.machine.allowed()
    }

    /// All states of `D`'s map.
    pub fn list(&self) -> impl Iterator<Item = &D::State> + '_ {
        self.machine.list()
    }

    /// The underlying machine, for queries not mirrored here.
    pub fn machine(&self) -> &Machine<D::State> {
        &self.machine
    }
}

impl<D: MappedState> Clone for StateValue<D> {
    fn clone(&self) -> Self {
        Self {
            machine: self.machine.clone(),
            _lifecycle: PhantomData,
        }
    }
}

impl<D: MappedState> fmt::Debug for StateValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateValue").field(self.get()).finish()
    }
}

impl<D: MappedState> PartialEq for StateValue<D> {
    fn eq(&self, other: &Self) -> bool {
        self.machine == other.machine
    }
}

impl<D: MappedState> Eq for StateValue<D> {}

impl<D: MappedState> Serialize for StateValue<D> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de, D: MappedState> Deserialize<'de> for StateValue<D> {
    fn deserialize<Z: Deserializer<'de>>(deserializer: Z) -> Result<Self, Z::Error> {
        let state = <D::State as Deserialize>::deserialize(deserializer)?;
        Self::restore(Snapshot::new(state)).map_err(Z::Error::custom)
    }
}
