//! The transition map: an immutable adjacency structure over states.

use super::error::StateError;
use super::state::State;
use crate::builder::BuildError;
use serde::de::{Error as _, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

/// Mapping from each known state to the set of states reachable in one hop.
///
/// The key set is exactly the set of known states. A state without outgoing
/// edges maps to an empty set. Self-transitions are implicit and never need
/// to be listed.
///
/// A door that can be opened, closed and locked:
///
/// ```text
/// OPEN <-> CLOSED <-> LOCKED
/// ```
///
/// ```rust
/// use statekeeper::core::TransitionMap;
///
/// let map: TransitionMap<String> = TransitionMap::from_edges([
///     ("OPEN", vec!["CLOSED"]),
///     ("CLOSED", vec!["LOCKED", "OPEN"]),
///     ("LOCKED", vec!["CLOSED"]),
/// ]);
///
/// assert_eq!(map.len(), 3);
/// assert!(map.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct TransitionMap<S: State> {
    edges: BTreeMap<S, BTreeSet<S>>,
    none: BTreeSet<S>,
}

impl<S: State> Default for TransitionMap<S> {
    fn default() -> Self {
        Self {
            edges: BTreeMap::new(),
            none: BTreeSet::new(),
        }
    }
}

impl<S: State> TransitionMap<S> {
    /// Build a map from `(state, targets)` pairs.
    ///
    /// Repeated states have their targets merged. Edge closure is not
    /// checked here; call [`validate`](Self::validate) or use
    /// [`TransitionMapBuilder`](crate::builder::TransitionMapBuilder) for that.
    pub fn from_edges<I, F, T>(edges: I) -> Self
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<S>,
        T: IntoIterator,
        T::Item: Into<S>,
    {
        let mut map = Self::default();
        for (from, targets) in edges {
            map.edges
                .entry(from.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }
        map
    }

    /// Build a map from edges whose states are already typed.
    ///
    /// This is what [`transition_map!`](crate::transition_map) expands to, so
    /// the state type is taken from context even when every entry is empty.
    pub fn from_typed_edges(edges: Vec<(S, Vec<S>)>) -> Self {
        Self::from_edges(edges)
    }

    /// Number of known states.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the map has no states at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether `state` is a key of the map.
    pub fn contains(&self, state: &S) -> bool {
        self.edges.contains_key(state)
    }

    /// All known states, in state order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.edges.keys()
    }

    /// Outgoing edges of `state`, or `None` if the state is unknown.
    pub fn targets(&self, state: &S) -> Option<&BTreeSet<S>> {
        self.edges.get(state)
    }

    /// Iterate over `(state, outgoing edges)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BTreeSet<S>)> + '_ {
        self.edges.iter()
    }

    /// Check that every edge points at a known state.
    pub fn validate(&self) -> Result<(), BuildError> {
        for (from, targets) in &self.edges {
            if let Some(to) = targets.iter().find(|to| !self.edges.contains_key(*to)) {
                return Err(BuildError::DanglingEdge {
                    from: from.name().to_string(),
                    to: to.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn ensure_known(&self, state: &S) -> Result<(), StateError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(StateError::unknown(state, self.states()))
        }
    }

    /// Outgoing edges of a state already known to be a key.
    pub(crate) fn edges_of(&self, state: &S) -> &BTreeSet<S> {
        self.edges.get(state).unwrap_or(&self.none)
    }
}

impl<S, F, T> FromIterator<(F, T)> for TransitionMap<S>
where
    S: State,
    F: Into<S>,
    T: IntoIterator,
    T::Item: Into<S>,
{
    fn from_iter<I: IntoIterator<Item = (F, T)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<S: State> fmt::Debug for TransitionMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.edges.iter()).finish()
    }
}

impl<S: State> Serialize for TransitionMap<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        self.edges.serialize(serializer)
    }
}

impl<'de, S: State> Deserialize<'de> for TransitionMap<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TransitionEntries::deserialize(deserializer)?
            .into_map()
            .map_err(D::Error::custom)
    }
}

/// Declared `(state, targets)` pairs in source order, duplicates included.
///
/// Decoding into a `BTreeMap` would let a repeated key silently replace the
/// earlier one; this keeps every entry so the repeat can be reported.
#[derive(Debug)]
pub(crate) struct TransitionEntries<S: State>(pub(crate) Vec<(S, BTreeSet<S>)>);

impl<S: State> TransitionEntries<S> {
    /// Collect the entries into a map, rejecting a state declared twice.
    ///
    /// Edge closure is not checked.
    pub(crate) fn into_map(self) -> Result<TransitionMap<S>, BuildError> {
        let mut map = TransitionMap::default();
        for (state, targets) in self.0 {
            if map.edges.contains_key(&state) {
                return Err(BuildError::DuplicateState {
                    state: state.name().to_string(),
                });
            }
            map.edges.insert(state, targets);
        }
        Ok(map)
    }
}

impl<'de, S: State> Deserialize<'de> for TransitionEntries<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<S>(PhantomData<fn() -> S>);

impl<'de, S: State> Visitor<'de> for EntriesVisitor<S> {
    type Value = TransitionEntries<S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from each state to the states it can reach")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((state, targets)) = access.next_entry::<S, BTreeSet<S>>()? {
            entries.push((state, targets));
        }
        Ok(TransitionEntries(entries))
    }
}
