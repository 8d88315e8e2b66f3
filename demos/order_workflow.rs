//! E-commerce Order Workflow
//!
//! This example walks one order through its lifecycle with two parties.
//!
//! Key concepts:
//! - Actors matched against order fields (supplier vs. consumer)
//! - Scope conditions restricting which rules apply
//! - Required fields gating a transition
//! - Explaining unavailable moves with show_transitions
//!
//! Run with: cargo run --example order_workflow

use warden::builder::rule;
use warden::core::Principal;
use warden::engine::{Engine, TransitionError};
use warden::subject;

subject! {
    #[derive(Debug)]
    struct Order {
        id: u64,
        state: String,
        kind: String,
        supplier: u64,
        consumer: u64,
        payment: Option<String>,
        shipping_address: Option<String>,
    }
}

fn order_rules() -> Engine<Order> {
    Engine::builder()
        .rule(
            rule("initial", "paid")
                .actor_field("consumer")
                .when_eq("kind", "retail")
                .require("payment"),
        )
        .unwrap()
        .rule(rule("initial", "cancelled").actor_field("consumer"))
        .unwrap()
        .rule(
            rule("paid", "shipped")
                .actor_field("supplier")
                .require("shipping_address"),
        )
        .unwrap()
        .rule(rule("shipped", "delivered").actor_field("consumer"))
        .unwrap()
        .build()
        .unwrap()
}

fn show_options(engine: &Engine<Order>, order: &Order, who: &str, actor: &Principal) {
    println!("  Options for {} in '{}':", who, order.state);
    for view in engine.show_transitions(order, actor).unwrap() {
        println!(
            "    -> {:<10} authorized: {:<5} can perform: {:<5} missing: {:?}",
            view.to, view.is_authorized, view.can_perform, view.missing_required_fields
        );
    }
}

fn main() {
    println!("=== E-commerce Order Workflow ===\n");

    let engine = order_rules();
    println!("Order rules registered: {} rules", engine.rule_count());
    println!("States with outgoing rules: {:?}\n", engine.states().collect::<Vec<_>>());

    let supplier = Principal::new(10);
    let consumer = Principal::new(20);

    let mut order = Order {
        id: 12345,
        state: "initial".to_string(),
        kind: "retail".to_string(),
        supplier: 10,
        consumer: 20,
        payment: None,
        shipping_address: None,
    };

    println!("Processing order {}:", order.id);
    show_options(&engine, &order, "supplier", &supplier);
    show_options(&engine, &order, "consumer", &consumer);
    println!();

    println!("Step 1: Pay without payment details");
    match engine.perform_transition(&mut order, &consumer, "paid", &()) {
        Err(TransitionError::Requirement { missing, .. }) => {
            println!("  Rejected, missing: {:?}\n", missing)
        }
        other => println!("  Unexpected outcome: {:?}\n", other),
    }

    println!("Step 2: Supplier tries to pay on the consumer's behalf");
    if let Err(e) = engine.perform_transition(&mut order, &supplier, "paid", &()) {
        println!("  Error: {}\n", e);
    }

    println!("Step 3: Pay with a card");
    order.payment = Some("card".to_string());
    let record = engine
        .perform_transition(&mut order, &consumer, "paid", &())
        .unwrap();
    println!("  {} -> {} (record {})\n", record.from, record.to, record.id);

    println!("Step 4: Ship");
    println!(
        "  Missing before shipping: {:?}",
        engine.missing_fields_for(&order, "shipped").unwrap()
    );
    order.shipping_address = Some("123 Main St, City, State 12345".to_string());
    engine
        .perform_transition(&mut order, &supplier, "shipped", &())
        .unwrap();
    println!("  Order is now '{}'\n", order.state);

    println!("Step 5: Deliver");
    engine
        .perform_transition(&mut order, &consumer, "delivered", &())
        .unwrap();
    println!("  Order is now '{}'", order.state);
    println!(
        "  Further moves for the consumer: {:?}\n",
        engine.successors(&order, &consumer).unwrap()
    );

    println!("Key Takeaways:");
    println!("- Each party only sees the moves its fields authorize");
    println!("- Authorization is checked before required fields");
    println!("- show_transitions explains why a move is unavailable");

    println!("\n=== Example Complete ===");
}
