//! Statekeeper: a mapped finite-state validator
//!
//! Statekeeper guards object lifecycles (orders, doors, workflows) with a
//! fixed graph of named states. A machine tracks one current state and only
//! lets it move along an edge of the graph.
//!
//! # Core Concepts
//!
//! - **State**: an opaque, comparable identifier via the `State` trait
//! - **TransitionMap**: the immutable one-hop adjacency of every known state
//! - **Machine**: the engine holding a map and a current state
//! - **StateValue**: a self-contained value whose map comes from a `MappedState`
//! - **Snapshot**: the current state alone, encoded as JSON or binary
//!
//! Transitioning to the current state is always allowed and does nothing.
//! Any other request fails with `UnknownState` when the target is not in the
//! map, or `IllegalTransition` when it is not an outgoing edge.
//!
//! # Example
//!
//! ```rust
//! use statekeeper::core::{StateError, TransitionMap};
//! use statekeeper::{state_enum, transition_map, Machine};
//!
//! state_enum! {
//!     enum Door {
//!         Open,
//!         Closed,
//!         Locked,
//!     }
//! }
//!
//! let map: TransitionMap<Door> = transition_map! {
//!     Door::Open => [Door::Closed],
//!     Door::Closed => [Door::Locked, Door::Open],
//!     Door::Locked => [Door::Closed],
//! };
//!
//! let mut door = Machine::new(map, Door::Open).unwrap();
//!
//! assert!(matches!(
//!     door.transition(Door::Locked),
//!     Err(StateError::IllegalTransition { .. })
//! ));
//! door.transition(Door::Closed).unwrap();
//! door.transition(Door::Closed).unwrap();
//! door.transition(Door::Locked).unwrap();
//! assert!(door.is([Door::Locked]).unwrap());
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod engine;
pub mod snapshot;
pub mod value;

// Re-export commonly used types
pub use builder::{BuildError, TransitionMapBuilder};
pub use crate::core::{State, StateError, StateHistory, StateTransition, TransitionMap};
pub use definition::{DefinitionError, MachineDefinition};
pub use engine::Machine;
pub use snapshot::{Snapshot, SnapshotError};
pub use value::{MappedState, StateValue};
