//! The transition graph engine.
//!
//! A [`Machine`] owns a shared, immutable [`TransitionMap`](crate::core::TransitionMap)
//! and a current state. Every request is answered with one-hop lookups:
//!
//! - `transition` moves along an outgoing edge, or is a no-op to the current state
//! - `is`, `list`, `allowed` and `allowed_from` query the graph
//! - equality compares current states only
//!
//! The machine is a plain value with no interior locking. Sharing one across
//! threads requires the caller to serialise access.

mod machine;

pub use machine::Machine;
