//! Reasons a transition is blocked.

use thiserror::Error;

/// One reason a transition cannot be performed right now.
///
/// Diagnosis collects every applicable violation instead of stopping at the
/// first, so a caller can show everything that stands in the way at once.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("No transition from '{from}' to '{to}' in current scope")]
    NoRule { from: String, to: String },

    #[error("Actor is not authorized to move from '{from}' to '{to}'")]
    Unauthorized { from: String, to: String },

    #[error("Required field '{field}' is missing")]
    MissingField { field: String },
}
