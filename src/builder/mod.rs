//! Builder API for ergonomic map construction.
//!
//! This module provides a validating builder and macros for declaring
//! states and transition maps with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod map;

pub use error::BuildError;
pub use map::TransitionMapBuilder;
