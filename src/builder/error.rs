//! Configuration errors for rule and engine builders.

use thiserror::Error;

/// Errors that can occur when building rules and engines.
///
/// A rule that fails to build is never registered.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Rule source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Rule destination state not specified. Call .to(state)")]
    MissingToState,

    #[error("Actor spec references an empty field name")]
    EmptyActorField,

    #[error("Actor spec references an empty kind")]
    EmptyActorKind,

    #[error("Required field name is empty")]
    EmptyRequiredField,

    #[error("Scope entry has an empty field name")]
    EmptyScopeField,

    #[error("Scope field '{field}' is declared more than once")]
    DuplicateScopeField { field: String },

    #[error("Scope guard on '{field}' takes {arity} arguments; expected 1 or 2")]
    UnsupportedArity { field: String, arity: usize },

    #[error("Performer name is empty")]
    EmptyPerformer,

    #[error("Rule '{from}' -> '{to}' names unknown performer '{name}'")]
    UnknownPerformer {
        from: String,
        to: String,
        name: String,
    },

    #[error("State field name is empty")]
    EmptyStateField,
}
