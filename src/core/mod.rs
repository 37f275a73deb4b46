//! Core types shared by every machine shape.
//!
//! This module contains the building blocks of transition validation:
//! - State identifiers via the `State` trait
//! - The immutable `TransitionMap` adjacency structure
//! - The `StateError` taxonomy
//! - History of applied transitions

mod error;
mod history;
mod map;
mod state;

pub use error::StateError;
pub use history::{StateHistory, StateTransition};
pub(crate) use map::TransitionEntries;
pub use map::TransitionMap;
pub use state::State;
