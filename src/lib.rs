//! Warden: declarative state-transition authorization
//!
//! Warden centralizes "who can move this object from state A to state B,
//! under what conditions, with what data present". Rules are declared once
//! at setup; at call time the engine evaluates them against an object and
//! an actor, and either explains what is possible or performs the move.
//!
//! # Core Concepts
//!
//! - **Subject**: any object exposing named fields via the `Subject` trait
//! - **Rule**: one edge between two states, gated by actor, scope and
//!   required fields
//! - **Engine**: an immutable registry of rules with the query and perform
//!   surface
//! - **Performer**: optional named hooks around the state write
//!
//! Rule evaluation is pure. The only mutation is the state write inside
//! `perform_transition`, plus whatever the embedding's hooks do.
//!
//! # Example
//!
//! ```rust
//! use warden::builder::rule;
//! use warden::core::Principal;
//! use warden::engine::{Engine, TransitionError};
//! use warden::subject;
//!
//! subject! {
//!     #[derive(Debug, Default)]
//!     struct Order {
//!         state: String,
//!         supplier: u64,
//!         consumer: u64,
//!         payment: Option<String>,
//!     }
//! }
//!
//! let engine: Engine<Order> = Engine::builder()
//!     .rule(rule("initial", "shipped").actor_field("supplier"))?
//!     .rule(rule("initial", "paid").actor_field("consumer").require("payment"))?
//!     .build()?;
//!
//! let supplier = Principal::new(1);
//! let consumer = Principal::new(2);
//! let mut order = Order { state: "initial".into(), supplier: 1, consumer: 2, payment: None };
//!
//! assert_eq!(engine.successors(&order, &supplier).unwrap(), vec!["shipped"]);
//! assert_eq!(engine.successors(&order, &consumer).unwrap(), vec!["paid"]);
//!
//! let err = engine.perform_transition(&mut order, &consumer, "paid", &()).unwrap_err();
//! assert!(matches!(err, TransitionError::Requirement { .. }));
//!
//! order.payment = Some("card".into());
//! engine.perform_transition(&mut order, &consumer, "paid", &()).unwrap();
//! assert_eq!(order.state, "paid");
//! # Ok::<(), warden::builder::ConfigError>(())
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod governed;

// Re-export commonly used types
pub use builder::{rule, ConfigError, EngineBuilder, RuleBuilder};
pub use core::{Actor, ActorSpec, Rule, Subject};
pub use engine::{Engine, TransitionError, TransitionRecord, TransitionView};
pub use governed::Governed;
pub use serde_json::{Map, Value};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
