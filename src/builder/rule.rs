//! Builder for constructing transition rules.

use crate::builder::error::ConfigError;
use crate::core::{ActorSpec, Condition, Predicate, Rule, Scope, Subject};
use serde_json::Value;
use std::collections::HashSet;

/// Builder for constructing rules with a fluent API.
///
/// Validation happens in [`build`](Self::build); nothing is checked while
/// chaining.
pub struct RuleBuilder<O> {
    from: Option<String>,
    to: Option<String>,
    actors: Vec<ActorSpec>,
    scope: Vec<(String, Condition<O>)>,
    required: Vec<String>,
    performer: Option<String>,
}

impl<O: Subject> RuleBuilder<O> {
    /// Create a new rule builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            actors: Vec::new(),
            scope: Vec::new(),
            required: Vec::new(),
            performer: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Allow an actor spec. Specs accumulate; any one matching authorizes.
    pub fn actor(mut self, spec: ActorSpec) -> Self {
        self.actors.push(spec);
        self
    }

    /// Allow the actor stored in the subject's `field`.
    pub fn actor_field(self, field: impl Into<String>) -> Self {
        self.actor(ActorSpec::field(field))
    }

    /// Allow any actor of `kind`.
    pub fn actor_kind(self, kind: impl Into<String>) -> Self {
        self.actor(ActorSpec::kind(kind))
    }

    /// Add a scope entry.
    pub fn condition(mut self, field: impl Into<String>, condition: Condition<O>) -> Self {
        self.scope.push((field.into(), condition));
        self
    }

    /// Scope: `field` must equal `value`.
    pub fn when_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::Equals(value.into()))
    }

    /// Scope: `field` must satisfy a guard over its value.
    pub fn when<F>(self, field: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.condition(field, Condition::Satisfies(Predicate::unary(predicate)))
    }

    /// Scope: `field` must satisfy a guard over its value and the subject.
    pub fn when_with<F>(self, field: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &O) -> bool + Send + Sync + 'static,
    {
        self.condition(field, Condition::Satisfies(Predicate::binary(predicate)))
    }

    /// Scope: `field` must satisfy an arbitrary predicate.
    pub fn guard(self, field: impl Into<String>, predicate: Predicate<O>) -> Self {
        self.condition(field, Condition::Satisfies(predicate))
    }

    /// Require `field` to be present before the transition can be performed.
    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    /// Require several fields, in order.
    pub fn require_all<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.required.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Name the performer whose hooks run around this transition.
    pub fn performer(mut self, name: impl Into<String>) -> Self {
        self.performer = Some(name.into());
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<Rule<O>, ConfigError> {
        let from = self
            .from
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingFromState)?;
        let to = self
            .to
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingToState)?;

        for spec in &self.actors {
            match spec {
                ActorSpec::Field(name) if name.is_empty() => {
                    return Err(ConfigError::EmptyActorField)
                }
                ActorSpec::Kind(name) if name.is_empty() => {
                    return Err(ConfigError::EmptyActorKind)
                }
                _ => {}
            }
        }

        let mut seen = HashSet::new();
        for (field, condition) in &self.scope {
            if field.is_empty() {
                return Err(ConfigError::EmptyScopeField);
            }
            if !seen.insert(field.as_str()) {
                return Err(ConfigError::DuplicateScopeField {
                    field: field.clone(),
                });
            }
            if let Condition::Satisfies(predicate) = condition {
                let arity = predicate.arity();
                if !(1..=2).contains(&arity) {
                    return Err(ConfigError::UnsupportedArity {
                        field: field.clone(),
                        arity,
                    });
                }
            }
        }

        if self.required.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyRequiredField);
        }

        if self.performer.as_deref() == Some("") {
            return Err(ConfigError::EmptyPerformer);
        }

        Ok(Rule {
            from,
            to,
            actors: self.actors,
            scope: Scope::new(self.scope),
            required: self.required,
            performer: self.performer,
        })
    }
}

impl<O: Subject> Default for RuleBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}
