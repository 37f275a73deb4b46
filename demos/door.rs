//! Lockable Door
//!
//! This example walks a door through its lifecycle.
//!
//! Key concepts:
//! - String state identifiers
//! - Self-transitions are silent no-ops
//! - Rejected transitions explain what is allowed instead
//!
//! Run with: cargo run --example door

use statekeeper::core::TransitionMap;
use statekeeper::{transition_map, Machine};

fn main() {
    println!("=== Lockable Door ===\n");

    let map: TransitionMap<String> = transition_map! {
        "OPEN" => ["CLOSED"],
        "CLOSED" => ["LOCKED", "OPEN"],
        "LOCKED" => ["CLOSED"],
    };

    let mut door = match Machine::new(map, "OPEN".to_string()) {
        Ok(door) => door.with_history(16),
        Err(err) => {
            eprintln!("Invalid door definition: {err}");
            return;
        }
    };

    println!("Known states: {:?}", door.list().collect::<Vec<_>>());
    println!("Initial state: {}\n", door.current());

    for target in ["LOCKED", "CLOSED", "CLOSED", "LOCKED", "FOO"] {
        match door.transition(target) {
            Ok(()) => println!("  -> {target:<7} ok, now {}", door.current()),
            Err(err) => println!("  -> {target:<7} rejected: {err}"),
        }
    }

    if let Some(history) = door.history() {
        println!("\nPath taken: {:?}", history.get_path());
    }
    println!("\n=== Example Complete ===");
}
