//! Errors raised on the transition path.

use crate::core::{FieldError, ScopeError};
use std::fmt;
use thiserror::Error;

/// Point in a transition where a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Performer hook before the state is written.
    Before,
    /// Persistence callback after the state is written.
    Persist,
    /// Performer hook after persistence.
    After,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Before => "before",
            Self::Persist => "persist",
            Self::After => "after",
        };
        f.write_str(name)
    }
}

/// Failure reported by a hook or persistence callback.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur when performing a transition.
///
/// Checks run in a fixed order and the first failure wins: `Unexpected`,
/// then `AccessViolation`, then `Requirement`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("No transition from '{from}' to '{to}' in current scope")]
    Unexpected { from: String, to: String },

    #[error("Actor may not move from '{from}' to '{to}'")]
    AccessViolation { from: String, to: String },

    #[error("Cannot move from '{from}' to '{to}': missing required fields {missing:?}")]
    Requirement {
        from: String,
        to: String,
        missing: Vec<String>,
    },

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("{stage} hook failed: {source}")]
    Hook {
        stage: HookStage,
        #[source]
        source: HookError,
    },

    #[error("Failed to write state: {0}")]
    StateWrite(#[from] FieldError),
}

impl TransitionError {
    /// Missing fields carried by a `Requirement` error.
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            Self::Requirement { missing, .. } => Some(missing),
            _ => None,
        }
    }
}
