//! Named-field access for objects governed by an engine.
//!
//! The engine has no schema of its own. Everything it knows about an object
//! (its current state, the fields referenced by scopes, required-field lists
//! and actor specs) is read by name through the [`Subject`] trait.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised when writing a field on a subject.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("Unknown field '{field}'")]
    Unknown { field: String },

    #[error("Field '{field}' rejected value: {reason}")]
    Rejected { field: String, reason: String },
}

/// An object whose fields can be read and written by name.
///
/// Implement this by hand for types with a fixed field set, or generate it
/// with the [`subject!`](crate::subject) macro.
///
/// # Example
///
/// ```rust
/// use warden::core::{FieldError, Subject};
/// use warden::Value;
///
/// struct Ticket {
///     state: String,
///     assignee: Option<u64>,
/// }
///
/// impl Subject for Ticket {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "state" => Some(Value::from(self.state.clone())),
///             "assignee" => Some(self.assignee.map(Value::from).unwrap_or(Value::Null)),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
///         match (name, value) {
///             ("state", Value::String(state)) => {
///                 self.state = state;
///                 Ok(())
///             }
///             (field, value) => Err(FieldError::Rejected {
///                 field: field.to_string(),
///                 reason: format!("unsupported value {value}"),
///             }),
///         }
///     }
/// }
///
/// let ticket = Ticket { state: "open".into(), assignee: None };
/// assert_eq!(ticket.field("state"), Some(Value::from("open")));
/// assert_eq!(ticket.field("assignee"), Some(Value::Null));
/// ```
pub trait Subject {
    /// Read a field by name. `None` means the subject has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// Write a field by name. The engine only ever writes the state field.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError>;
}

/// Whether a field value counts as absent: unknown, null, or an empty
/// string, array or object.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

impl Subject for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        self.insert(name.to_string(), value);
        Ok(())
    }
}
