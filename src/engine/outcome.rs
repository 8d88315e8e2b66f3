//! Values produced by engine queries and transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate transition, with what the actor can do about it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionView {
    /// Destination state.
    pub to: String,
    /// The actor satisfies the rule's actor specs.
    pub is_authorized: bool,
    /// Authorized and no required field is missing.
    pub can_perform: bool,
    /// Required fields as declared on the rule.
    pub required_fields: Vec<String>,
    /// Required fields currently null or empty on the subject.
    pub missing_required_fields: Vec<String>,
}

/// Data handed to hooks while a transition is in flight.
#[derive(Debug)]
pub struct TransitionContext<'a, X> {
    /// Same id as the resulting [`TransitionRecord`].
    pub id: Uuid,
    pub from: &'a str,
    pub to: &'a str,
    pub performer: Option<&'a str>,
    /// Caller-supplied side data, passed through unchanged.
    pub extra: &'a X,
}

/// Record of a transition that was applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub performer: Option<String>,
    pub performed_at: DateTime<Utc>,
}
