//! Actors and the specs that authorize them.

use super::subject::Subject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The entity attempting a transition.
///
/// An actor is matched in one of two ways:
/// - by value, against a named field on the subject ([`ActorSpec::Field`]);
/// - by kind, against a type reference ([`ActorSpec::Kind`]).
pub trait Actor {
    /// Value compared for equality against the subject's actor fields.
    fn identity(&self) -> Value;

    /// Whether this actor belongs to `kind`.
    ///
    /// Instances answer for their own kind and every kind it derives from.
    /// An actor that is itself a type reference answers only for that exact
    /// kind. Default implementation returns `false`.
    fn is_kind(&self, _kind: &str) -> bool {
        false
    }
}

impl Actor for Value {
    fn identity(&self) -> Value {
        self.clone()
    }
}

/// One entry of a rule's allowed-actor list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ActorSpec {
    /// The actor must equal the subject's field of this name.
    Field(String),

    /// The actor must be of this kind.
    Kind(String),
}

impl ActorSpec {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn kind(name: impl Into<String>) -> Self {
        Self::Kind(name.into())
    }

    /// Check this spec against a subject and actor (pure).
    ///
    /// A null or unknown subject field authorizes nobody.
    pub fn matches<O, A>(&self, subject: &O, actor: &A) -> bool
    where
        O: Subject,
        A: Actor + ?Sized,
    {
        match self {
            Self::Field(name) => match subject.field(name) {
                None | Some(Value::Null) => false,
                Some(value) => value == actor.identity(),
            },
            Self::Kind(kind) => actor.is_kind(kind),
        }
    }
}

/// A type reference used directly as an actor.
///
/// Matches a [`ActorSpec::Kind`] only when the names are identical.
/// Derived kinds do not match their parents here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Kind(pub String);

impl Kind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Actor for Kind {
    fn identity(&self) -> Value {
        Value::String(self.0.clone())
    }

    fn is_kind(&self, kind: &str) -> bool {
        self.0 == kind
    }
}

/// A concrete actor: an identity plus its kind lineage, most specific first.
///
/// # Example
///
/// ```rust
/// use warden::core::{Actor, Principal};
///
/// let admin = Principal::new(7).with_kind("Admin").with_kind("User");
///
/// assert!(admin.is_kind("Admin"));
/// assert!(admin.is_kind("User"));
/// assert!(!admin.is_kind("Supplier"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    id: Value,
    kinds: Vec<String>,
}

impl Principal {
    pub fn new(id: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            kinds: Vec::new(),
        }
    }

    /// Add a kind to the lineage.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kinds.push(kind.into());
        self
    }

    pub fn id(&self) -> &Value {
        &self.id
    }

    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }
}

impl Actor for Principal {
    fn identity(&self) -> Value {
        self.id.clone()
    }

    fn is_kind(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn order(owner: Value) -> Map<String, Value> {
        let mut subject = Map::new();
        subject.insert("owner".into(), owner);
        subject
    }

    #[test]
    fn field_spec_matches_by_value() {
        let subject = order(json!(1));
        let spec = ActorSpec::field("owner");

        assert!(spec.matches(&subject, &Principal::new(1)));
        assert!(!spec.matches(&subject, &Principal::new(2)));
    }

    #[test]
    fn field_spec_never_matches_null_or_unknown_field() {
        let spec = ActorSpec::field("owner");

        assert!(!spec.matches(&order(Value::Null), &Value::Null));
        assert!(!spec.matches(&Map::new(), &json!(1)));
    }

    #[test]
    fn kind_spec_matches_instances_of_derived_kinds() {
        let subject = Map::new();
        let spec = ActorSpec::kind("User");

        let admin = Principal::new(1).with_kind("Admin").with_kind("User");
        let guest = Principal::new(2).with_kind("Guest");

        assert!(spec.matches(&subject, &admin));
        assert!(!spec.matches(&subject, &guest));
    }

    #[test]
    fn plain_values_belong_to_no_kind() {
        let subject = order(json!(1));

        assert!(!ActorSpec::kind("User").matches(&subject, &json!(1)));
        assert!(ActorSpec::field("owner").matches(&subject, &json!(1)));
    }

    #[test]
    fn kind_reference_matches_only_itself() {
        let subject = Map::new();

        assert!(ActorSpec::kind("User").matches(&subject, &Kind::new("User")));
        assert!(!ActorSpec::kind("User").matches(&subject, &Kind::new("Admin")));
    }

    #[test]
    fn spec_serializes_as_tagged_union() {
        let json = serde_json::to_value(ActorSpec::field("owner")).unwrap();
        assert_eq!(json, json!({ "kind": "field", "name": "owner" }));

        let spec: ActorSpec = serde_json::from_value(json!({ "kind": "kind", "name": "User" })).unwrap();
        assert_eq!(spec, ActorSpec::kind("User"));
    }
}
