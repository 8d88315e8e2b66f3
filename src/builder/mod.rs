//! Builder API for declaring rules and assembling engines.
//!
//! Rules are declared with [`RuleBuilder`] (or the [`rule`] shorthand) and
//! registered on an [`EngineBuilder`], which produces an immutable engine.

pub mod engine;
pub mod error;
pub mod macros;
pub mod rule;

pub use engine::EngineBuilder;
pub use error::ConfigError;
pub use rule::RuleBuilder;

use crate::core::Subject;

/// Start a rule from `from` to `to`.
///
/// # Example
///
/// ```
/// use warden::builder::rule;
/// use warden::engine::Engine;
/// use warden::{Map, Value};
///
/// let engine: Engine<Map<String, Value>> = Engine::builder()
///     .rule(rule("initial", "paid").actor_field("consumer").require("payment"))?
///     .rule(rule("initial", "shipped").actor_field("supplier"))?
///     .build()?;
///
/// assert_eq!(engine.rules_from("initial").len(), 2);
/// # Ok::<(), warden::builder::ConfigError>(())
/// ```
pub fn rule<O: Subject>(from: impl Into<String>, to: impl Into<String>) -> RuleBuilder<O> {
    RuleBuilder::new().from(from).to(to)
}
