//! Core State trait for state identifiers.
//!
//! A state is an opaque, comparable token naming one node of a transition
//! graph. It carries no meaning beyond identity and a human-readable name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for state identifiers.
///
/// # Required Traits
///
/// - `Clone`: the engine hands out and records owned copies
/// - `Ord`: transition maps are ordered by state
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: states travel through snapshots and definitions
///
/// `String` implements this trait directly, and [`state_enum!`](crate::state_enum)
/// generates implementations for plain enums.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Placed,
///     Paid,
///     Shipped,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Placed => "Placed",
///             Self::Paid => "Paid",
///             Self::Shipped => "Shipped",
///         }
///     }
/// }
///
/// assert_eq!(OrderState::Paid.name(), "Paid");
/// ```
pub trait State: Clone + Ord + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
