//! Order Lifecycle
//!
//! This example embeds a self-contained lifecycle in a domain type.
//!
//! Key concepts:
//! - `state_enum!` for typed states
//! - `MappedState` supplies the map once per lifecycle
//! - Serializing the order stores only the current status
//! - Restoring checks the status against the rebuilt map
//!
//! Run with: cargo run --example order_lifecycle

use serde::{Deserialize, Serialize};
use statekeeper::core::TransitionMap;
use statekeeper::{state_enum, transition_map, MappedState, StateValue};

state_enum! {
    enum OrderStatus {
        Placed,
        Paid,
        Shipped,
        Delivered,
        Cancelled,
    }
}

struct OrderLifecycle;

impl MappedState for OrderLifecycle {
    type State = OrderStatus;

    fn transition_map() -> TransitionMap<OrderStatus> {
        transition_map! {
            OrderStatus::Placed => [OrderStatus::Paid, OrderStatus::Cancelled],
            OrderStatus::Paid => [OrderStatus::Shipped, OrderStatus::Cancelled],
            OrderStatus::Shipped => [OrderStatus::Delivered],
            OrderStatus::Delivered => [],
            OrderStatus::Cancelled => [],
        }
    }

    fn initial_state() -> OrderStatus {
        OrderStatus::Placed
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Order {
    id: u64,
    status: StateValue<OrderLifecycle>,
}

fn main() {
    println!("=== Order Lifecycle ===\n");

    let status = match StateValue::new() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("Invalid lifecycle: {err}");
            return;
        }
    };
    let mut order = Order { id: 42, status };

    for next in [
        OrderStatus::Shipped,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ] {
        match order.status.transition(next) {
            Ok(()) => println!("  {next:<9} ok"),
            Err(err) => println!("  {next:<9} rejected: {err}"),
        }
    }

    let json = match serde_json::to_string(&order) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("Failed to serialize order: {err}");
            return;
        }
    };
    println!("\nStored as: {json}");

    match serde_json::from_str::<Order>(&json) {
        Ok(restored) => println!("Restored order {} in {}", restored.id, restored.status.get()),
        Err(err) => println!("Restore failed: {err}"),
    }

    let tampered = json.replace("Shipped", "Refunded");
    match serde_json::from_str::<Order>(&tampered) {
        Ok(order) => println!("Unexpectedly restored {:?}", order),
        Err(err) => println!("Tampered record rejected: {err}"),
    }

    println!("\n=== Example Complete ===");
}
