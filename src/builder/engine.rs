//! Builder for constructing engines.

use crate::builder::error::ConfigError;
use crate::builder::rule::RuleBuilder;
use crate::core::{Rule, Subject};
use crate::engine::{Engine, EngineOptions, HookError, HookFn, PerformerHooks, TransitionContext};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Builder for constructing engines with a fluent API.
///
/// This is the registration phase: rules, performers and the persistence
/// callback are collected here, then moved into an immutable [`Engine`].
pub struct EngineBuilder<O, X = ()> {
    options: EngineOptions,
    registry: BTreeMap<String, Vec<Rule<O>>>,
    performers: HashMap<String, PerformerHooks<O, X>>,
    persist: Option<HookFn<O, X>>,
}

impl<O: Subject, X> EngineBuilder<O, X> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: EngineOptions::default(),
            registry: BTreeMap::new(),
            performers: HashMap::new(),
            persist: None,
        }
    }

    /// Replace all options.
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the name of the subject field holding the state.
    pub fn state_field(mut self, field: impl Into<String>) -> Self {
        self.options.state_field = field.into();
        self
    }

    /// Build a rule and append it under its source state.
    ///
    /// Rules are never replaced: registering the same pair twice keeps both,
    /// in registration order. An invalid rule is not inserted.
    pub fn register(&mut self, builder: RuleBuilder<O>) -> Result<&mut Self, ConfigError> {
        let rule = builder.build()?;
        Ok(self.register_rule(rule))
    }

    /// Append an already built rule under its source state.
    pub fn register_rule(&mut self, rule: Rule<O>) -> &mut Self {
        debug!(
            from = rule.from(),
            to = rule.to(),
            performer = rule.performer(),
            "registering transition rule"
        );
        self.registry
            .entry(rule.from().to_string())
            .or_default()
            .push(rule);
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(mut self, builder: RuleBuilder<O>) -> Result<Self, ConfigError> {
        self.register(builder)?;
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: Rule<O>) -> Self {
        self.register_rule(rule);
        self
    }

    /// Register hooks under a performer name referenced by rules.
    pub fn performer(mut self, name: impl Into<String>, hooks: PerformerHooks<O, X>) -> Self {
        self.performers.insert(name.into(), hooks);
        self
    }

    /// Set the callback that persists the subject after its state is written.
    pub fn persist<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut O, &TransitionContext<'_, X>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.persist = Some(Box::new(callback));
        self
    }

    /// Build the engine.
    /// Returns an error if a rule names an unregistered performer.
    pub fn build(self) -> Result<Engine<O, X>, ConfigError> {
        if self.options.state_field.is_empty() {
            return Err(ConfigError::EmptyStateField);
        }

        for rule in self.registry.values().flatten() {
            if let Some(name) = rule.performer() {
                if !self.performers.contains_key(name) {
                    return Err(ConfigError::UnknownPerformer {
                        from: rule.from().to_string(),
                        to: rule.to().to_string(),
                        name: name.to_string(),
                    });
                }
            }
        }

        debug!(
            states = self.registry.len(),
            rules = self.registry.values().map(Vec::len).sum::<usize>(),
            performers = self.performers.len(),
            "transition engine built"
        );

        Ok(Engine::from_parts(
            self.options,
            self.registry,
            self.performers,
            self.persist,
        ))
    }
}

impl<O: Subject, X> Default for EngineBuilder<O, X> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::rule;
    use serde_json::{Map, Value};

    type Record = Map<String, Value>;

    #[test]
    fn register_appends_in_order_without_replacing() {
        let mut builder = EngineBuilder::<Record>::new();
        builder.register(rule("initial", "paid").actor_field("consumer")).unwrap();
        builder.register(rule("initial", "paid").actor_kind("Admin")).unwrap();
        builder.register(rule("paid", "shipped")).unwrap();
        let engine = builder.build().unwrap();

        let rules = engine.rules_from("initial");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].actors()[0], crate::core::ActorSpec::field("consumer"));
        assert_eq!(rules[1].actors()[0], crate::core::ActorSpec::kind("Admin"));
        assert_eq!(engine.rule_count(), 3);
    }

    #[test]
    fn invalid_rule_is_not_inserted() {
        let mut builder = EngineBuilder::<Record>::new();
        builder.register(rule("initial", "paid")).unwrap();

        let result = builder.register(rule("initial", "shipped").require(""));
        assert!(matches!(result, Err(ConfigError::EmptyRequiredField)));

        let engine = builder.build().unwrap();
        assert_eq!(engine.rule_count(), 1);
    }

    #[test]
    fn unknown_performer_fails_build() {
        let result = EngineBuilder::<Record>::new()
            .rule(rule("pending", "approved").performer("approving"))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::UnknownPerformer { name, .. }) if name == "approving"
        ));
    }

    #[test]
    fn registered_performer_builds() {
        let result = EngineBuilder::<Record>::new()
            .performer("approving", PerformerHooks::new())
            .rule(rule("pending", "approved").performer("approving"))
            .unwrap()
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn empty_state_field_fails_build() {
        let result = EngineBuilder::<Record>::new().state_field("").build();
        assert!(matches!(result, Err(ConfigError::EmptyStateField)));
    }

    #[test]
    fn options_set_state_field() {
        let engine = EngineBuilder::<Record>::new()
            .options(EngineOptions {
                state_field: "status".into(),
            })
            .build()
            .unwrap();

        assert_eq!(engine.state_field(), "status");
    }

    #[test]
    fn add_rule_accepts_prebuilt_rules() {
        let prebuilt: Rule<Record> = rule("draft", "published").build().unwrap();
        let engine = EngineBuilder::<Record>::new()
            .add_rule(prebuilt)
            .build()
            .unwrap();

        assert_eq!(engine.rules_from("draft").len(), 1);
    }
}
