//! Scope conditions that decide whether a rule is live for an object.
//!
//! A scope is an ordered conjunction of `field -> condition` entries. Each
//! condition is either a literal the field must equal, or a predicate over
//! the field value (and optionally the whole subject).

use super::subject::Subject;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised from inside a scope predicate.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct GuardError {
    message: String,
}

impl GuardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A scope predicate failed while evaluating `field`.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Scope guard on '{field}' failed: {source}")]
pub struct ScopeError {
    pub field: String,
    #[source]
    pub source: GuardError,
}

/// Positional argument handed to a [`Predicate::dynamic`] guard.
pub enum GuardArg<'a, O> {
    Value(&'a Value),
    Subject(&'a O),
}

type UnaryFn = Arc<dyn Fn(&Value) -> Result<bool, GuardError> + Send + Sync>;
type BinaryFn<O> = Arc<dyn Fn(&Value, &O) -> Result<bool, GuardError> + Send + Sync>;
type DynamicFn<O> = Arc<dyn Fn(&[GuardArg<'_, O>]) -> Result<bool, GuardError> + Send + Sync>;

/// Guard over a field value.
///
/// Unary guards receive only the value. Binary guards receive the value and
/// the subject. Dynamic guards declare their arity and receive that many
/// positional arguments; an arity other than 1 or 2 is rejected when the
/// owning rule is built.
pub enum Predicate<O> {
    Unary(UnaryFn),
    Binary(BinaryFn<O>),
    Dynamic { arity: usize, check: DynamicFn<O> },
}

impl<O> Predicate<O> {
    pub fn unary<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Unary(Arc::new(move |value: &Value| Ok(predicate(value))))
    }

    pub fn binary<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &O) -> bool + Send + Sync + 'static,
    {
        Self::Binary(Arc::new(move |value: &Value, subject: &O| {
            Ok(predicate(value, subject))
        }))
    }

    /// Unary guard that may fail.
    pub fn try_unary<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        Self::Unary(Arc::new(predicate))
    }

    /// Binary guard that may fail.
    pub fn try_binary<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &O) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        Self::Binary(Arc::new(predicate))
    }

    /// Guard with a declared arity, called with `[value, subject][..arity]`.
    pub fn dynamic<F>(arity: usize, predicate: F) -> Self
    where
        F: Fn(&[GuardArg<'_, O>]) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        Self::Dynamic {
            arity,
            check: Arc::new(predicate),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
            Self::Dynamic { arity, .. } => *arity,
        }
    }

    /// Evaluate the guard. Errors are returned, never swallowed.
    pub fn check(&self, value: &Value, subject: &O) -> Result<bool, GuardError> {
        match self {
            Self::Unary(check) => check(value),
            Self::Binary(check) => check(value, subject),
            Self::Dynamic { arity, check } => {
                let args = [GuardArg::Value(value), GuardArg::Subject(subject)];
                check(args.get(..*arity).unwrap_or(&args[..]))
            }
        }
    }
}

impl<O> fmt::Debug for Predicate<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// What a single scope entry requires of its field.
pub enum Condition<O> {
    /// Field must equal this value.
    Equals(Value),

    /// Field must satisfy this guard.
    Satisfies(Predicate<O>),
}

impl<O> Condition<O> {
    pub fn evaluate(&self, value: &Value, subject: &O) -> Result<bool, GuardError> {
        match self {
            Self::Equals(expected) => Ok(value == expected),
            Self::Satisfies(predicate) => predicate.check(value, subject),
        }
    }
}

impl<O> fmt::Debug for Condition<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(value) => f.debug_tuple("Equals").field(value).finish(),
            Self::Satisfies(predicate) => f.debug_tuple("Satisfies").field(predicate).finish(),
        }
    }
}

/// Ordered conjunction of field conditions. Empty scope always passes.
pub struct Scope<O> {
    entries: Vec<(String, Condition<O>)>,
}

impl<O> Scope<O> {
    pub(crate) fn new(entries: Vec<(String, Condition<O>)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Scoped field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    pub fn condition(&self, field: &str) -> Option<&Condition<O>> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, condition)| condition)
    }
}

impl<O: Subject> Scope<O> {
    /// Evaluate every entry in order, stopping at the first that fails.
    ///
    /// An unknown field evaluates as `null`.
    pub fn passes(&self, subject: &O) -> Result<bool, ScopeError> {
        for (field, condition) in &self.entries {
            let value = subject.field(field).unwrap_or(Value::Null);
            let passed = condition
                .evaluate(&value, subject)
                .map_err(|source| ScopeError {
                    field: field.clone(),
                    source,
                })?;
            if !passed {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<O> fmt::Debug for Scope<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(field, condition)| (field, condition)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    type Record = Map<String, Value>;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_scope_always_passes() {
        let scope: Scope<Record> = Scope::new(Vec::new());
        assert!(scope.passes(&Record::new()).unwrap());
    }

    #[test]
    fn literal_conditions_form_a_conjunction() {
        let scope: Scope<Record> = Scope::new(vec![
            ("type".into(), Condition::Equals(json!("first"))),
            ("confirmed".into(), Condition::Equals(json!(true))),
        ]);

        let subject = record(&[("type", json!("first")), ("confirmed", json!(true))]);
        assert!(scope.passes(&subject).unwrap());

        let subject = record(&[("type", json!("first")), ("confirmed", json!(false))]);
        assert!(!scope.passes(&subject).unwrap());
    }

    #[test]
    fn unary_guard_receives_field_value() {
        let scope: Scope<Record> = Scope::new(vec![(
            "type".into(),
            Condition::Satisfies(Predicate::unary(|v| v == "first")),
        )]);

        assert!(scope.passes(&record(&[("type", json!("first"))])).unwrap());
        assert!(!scope.passes(&record(&[("type", json!("second"))])).unwrap());
    }

    #[test]
    fn binary_guard_receives_value_and_subject() {
        let scope: Scope<Record> = Scope::new(vec![(
            "type".into(),
            Condition::Satisfies(Predicate::binary(|v, subject: &Record| {
                subject.get("example_field") == Some(v)
            })),
        )]);

        let subject = record(&[("type", json!("first")), ("example_field", json!("first"))]);
        assert!(scope.passes(&subject).unwrap());

        let subject = record(&[("type", json!("second")), ("example_field", json!("first"))]);
        assert!(!scope.passes(&subject).unwrap());
    }

    #[test]
    fn dynamic_guard_receives_declared_number_of_args() {
        let one: Predicate<Record> = Predicate::dynamic(1, |args| Ok(args.len() == 1));
        let two: Predicate<Record> = Predicate::dynamic(2, |args| {
            Ok(matches!(args, [GuardArg::Value(_), GuardArg::Subject(_)]))
        });

        assert!(one.check(&Value::Null, &Record::new()).unwrap());
        assert!(two.check(&Value::Null, &Record::new()).unwrap());
        assert_eq!(one.arity(), 1);
        assert_eq!(two.arity(), 2);
    }

    #[test]
    fn guard_errors_propagate_with_field_name() {
        let scope: Scope<Record> = Scope::new(vec![(
            "amount".into(),
            Condition::Satisfies(Predicate::try_unary(|_| Err(GuardError::new("not a number")))),
        )]);

        let err = scope.passes(&Record::new()).unwrap_err();
        assert_eq!(err.field, "amount");
        assert_eq!(err.source.message(), "not a number");
    }

    #[test]
    fn evaluation_stops_at_first_failing_entry() {
        let scope: Scope<Record> = Scope::new(vec![
            ("type".into(), Condition::Equals(json!("first"))),
            (
                "amount".into(),
                Condition::Satisfies(Predicate::try_unary(|_| Err(GuardError::new("unreachable")))),
            ),
        ]);

        assert!(!scope.passes(&record(&[("type", json!("second"))])).unwrap());
    }
}
