//! Core rule types and evaluation.
//!
//! This module contains the pure part of the engine:
//! - Named-field access to governed objects via the `Subject` trait
//! - Actors and the specs that authorize them
//! - Scope conditions and guard predicates
//! - The immutable `Rule` and its read-only evaluation
//!
//! Nothing in this module mutates a subject.

mod actor;
mod rule;
mod scope;
mod subject;
mod violation;

pub use actor::{Actor, ActorSpec, Kind, Principal};
pub use rule::Rule;
pub use scope::{Condition, GuardArg, GuardError, Predicate, Scope, ScopeError};
pub use subject::{is_blank, FieldError, Subject};
pub use violation::Violation;
