//! The transition engine: registry lookup, authorization and execution.

use crate::builder::EngineBuilder;
use crate::core::{Actor, Rule, ScopeError, Subject, Violation};
use crate::engine::error::{HookError, HookStage, TransitionError};
use crate::engine::hooks::{HookFn, PerformerHooks};
use crate::engine::options::EngineOptions;
use crate::engine::outcome::{TransitionContext, TransitionRecord, TransitionView};
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Evaluates registered rules against subjects and performs transitions.
///
/// An engine is immutable once built: rules are registered on an
/// [`EngineBuilder`] and moved into the engine by `build()`. It holds no
/// per-subject state, so one engine can serve any number of subjects and
/// can be shared across threads (for example in a `LazyLock` static).
///
/// Rules for a source state are kept in registration order, and that order
/// is the tie-break for every query: the first matching rule wins.
///
/// # Concurrency
///
/// `perform_transition` takes the subject by `&mut`, so exclusive access is
/// enforced by the borrow checker. The engine does not serialize access to
/// a subject shared between threads; wrap such a subject in the caller's own
/// lock (e.g. `Mutex<O>`) or two transitions may race on the state field.
///
/// `X` is embedding-specific side data passed through `perform_transition`
/// to hooks unchanged.
pub struct Engine<O, X = ()> {
    options: EngineOptions,
    registry: BTreeMap<String, Vec<Rule<O>>>,
    performers: HashMap<String, PerformerHooks<O, X>>,
    persist: Option<HookFn<O, X>>,
}

impl<O: Subject, X> Engine<O, X> {
    /// Start building an engine.
    pub fn builder() -> EngineBuilder<O, X> {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(
        options: EngineOptions,
        registry: BTreeMap<String, Vec<Rule<O>>>,
        performers: HashMap<String, PerformerHooks<O, X>>,
        persist: Option<HookFn<O, X>>,
    ) -> Self {
        Self {
            options,
            registry,
            performers,
            persist,
        }
    }

    /// Name of the subject field holding the state.
    pub fn state_field(&self) -> &str {
        &self.options.state_field
    }

    /// The subject's current state, if its state field holds a string.
    pub fn current_state(&self, subject: &O) -> Option<String> {
        match subject.field(self.state_field()) {
            Some(Value::String(state)) => Some(state),
            _ => None,
        }
    }

    /// All rules registered from `state`, in registration order.
    pub fn rules_from(&self, state: &str) -> &[Rule<O>] {
        self.registry.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source states with at least one rule, sorted.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.registry.values().map(Vec::len).sum()
    }

    /// Rules from the subject's current state whose scope passes.
    ///
    /// A subject in an unknown state has no candidates.
    pub fn candidate_rules(&self, subject: &O) -> Result<Vec<&Rule<O>>, ScopeError> {
        let Some(state) = self.current_state(subject) else {
            return Ok(Vec::new());
        };

        let mut candidates = Vec::new();
        for rule in self.rules_from(&state) {
            if rule.scope_passes(subject)? {
                candidates.push(rule);
            }
        }
        Ok(candidates)
    }

    /// Candidate rules the actor is authorized to take.
    pub fn authorized_rules<A: Actor + ?Sized>(
        &self,
        subject: &O,
        actor: &A,
    ) -> Result<Vec<&Rule<O>>, ScopeError> {
        Ok(self
            .candidate_rules(subject)?
            .into_iter()
            .filter(|rule| rule.actor_authorized(subject, actor))
            .collect())
    }

    /// Destinations the actor may move the subject to.
    ///
    /// One entry per authorized rule, in registration order. A destination
    /// reachable through two rules is listed twice.
    pub fn successors<A: Actor + ?Sized>(
        &self,
        subject: &O,
        actor: &A,
    ) -> Result<Vec<String>, ScopeError> {
        Ok(self
            .authorized_rules(subject, actor)?
            .into_iter()
            .map(|rule| rule.to().to_string())
            .collect())
    }

    /// Every candidate transition with authorization and readiness details.
    ///
    /// Candidates the actor cannot take are included with
    /// `is_authorized: false`, so callers can explain why an action is
    /// unavailable without performing it.
    pub fn show_transitions<A: Actor + ?Sized>(
        &self,
        subject: &O,
        actor: &A,
    ) -> Result<Vec<TransitionView>, ScopeError> {
        Ok(self
            .candidate_rules(subject)?
            .into_iter()
            .map(|rule| {
                let is_authorized = rule.actor_authorized(subject, actor);
                let missing = rule.missing_required_fields(subject);
                TransitionView {
                    to: rule.to().to_string(),
                    is_authorized,
                    can_perform: is_authorized && missing.is_empty(),
                    required_fields: rule.required_fields().to_vec(),
                    missing_required_fields: missing,
                }
            })
            .collect())
    }

    /// Missing required fields for moving to `to`, regardless of actor.
    ///
    /// Uses the first candidate rule reaching `to`. Returns `None` when no
    /// such rule exists from the current state.
    pub fn missing_fields_for(
        &self,
        subject: &O,
        to: &str,
    ) -> Result<Option<Vec<String>>, ScopeError> {
        Ok(self
            .select(subject, to)?
            .map(|rule| rule.missing_required_fields(subject)))
    }

    /// Every reason the actor cannot move the subject to `to` right now.
    ///
    /// Unlike [`perform_transition`](Self::perform_transition) this does not
    /// stop at the first problem.
    pub fn check_transition<A: Actor + ?Sized>(
        &self,
        subject: &O,
        actor: &A,
        to: &str,
    ) -> Result<Validation<(), NonEmptyVec<Violation>>, ScopeError> {
        match self.select(subject, to)? {
            Some(rule) => Ok(rule.diagnose(subject, actor)),
            None => Ok(Validation::fail(Violation::NoRule {
                from: self.current_state(subject).unwrap_or_default(),
                to: to.to_string(),
            })),
        }
    }

    /// Move the subject to `to` on behalf of `actor`.
    ///
    /// Checks run in order and the first failure is returned:
    /// 1. a candidate rule reaches `to`, else [`TransitionError::Unexpected`];
    /// 2. the actor is authorized, else [`TransitionError::AccessViolation`];
    /// 3. required fields are present, else [`TransitionError::Requirement`].
    ///
    /// Then the performer's `before` hook runs, the state field is written,
    /// the persistence callback runs, and the performer's `after` hook runs.
    /// Absent hooks are skipped. `extra` reaches every hook unchanged.
    ///
    /// A failing `before` hook leaves the state field untouched. A failing
    /// persistence callback or `after` hook is reported as
    /// [`TransitionError::Hook`] after the state field has already been
    /// written, so the subject holds the new state in memory; the caller
    /// decides whether to roll it back.
    pub fn perform_transition<A: Actor + ?Sized>(
        &self,
        subject: &mut O,
        actor: &A,
        to: &str,
        extra: &X,
    ) -> Result<TransitionRecord, TransitionError> {
        let from = self.current_state(subject).unwrap_or_default();

        let Some(rule) = self.select(subject, to)? else {
            debug!(from = %from, to, "transition rejected: no matching rule");
            return Err(TransitionError::Unexpected {
                from,
                to: to.to_string(),
            });
        };

        if !rule.actor_authorized(subject, actor) {
            debug!(from = %from, to, "transition rejected: actor not authorized");
            return Err(TransitionError::AccessViolation {
                from,
                to: to.to_string(),
            });
        }

        let missing = rule.missing_required_fields(subject);
        if !missing.is_empty() {
            debug!(from = %from, to, ?missing, "transition rejected: required fields missing");
            return Err(TransitionError::Requirement {
                from,
                to: to.to_string(),
                missing,
            });
        }

        let hooks = rule.performer().and_then(|name| self.performers.get(name));
        let context = TransitionContext {
            id: Uuid::new_v4(),
            from: &from,
            to,
            performer: rule.performer(),
            extra,
        };

        if let Some(before) = hooks.and_then(|h| h.before.as_ref()) {
            run_hook(HookStage::Before, before, subject, &context)?;
        }

        subject.set_field(self.state_field(), Value::String(to.to_string()))?;

        if let Some(persist) = &self.persist {
            run_hook(HookStage::Persist, persist, subject, &context)?;
        }

        if let Some(after) = hooks.and_then(|h| h.after.as_ref()) {
            run_hook(HookStage::After, after, subject, &context)?;
        }

        info!(
            id = %context.id,
            from = %from,
            to,
            performer = rule.performer(),
            "transition applied"
        );

        Ok(TransitionRecord {
            id: context.id,
            from: from.clone(),
            to: to.to_string(),
            performer: rule.performer().map(str::to_string),
            performed_at: Utc::now(),
        })
    }

    /// First candidate rule reaching `to`, regardless of actor.
    ///
    /// Every rule from the current state is scope-checked, so a failing
    /// guard on any of them surfaces here as it does in the other queries.
    fn select(&self, subject: &O, to: &str) -> Result<Option<&Rule<O>>, ScopeError> {
        Ok(self
            .candidate_rules(subject)?
            .into_iter()
            .find(|rule| rule.to() == to))
    }
}

fn run_hook<O, X>(
    stage: HookStage,
    hook: &HookFn<O, X>,
    subject: &mut O,
    context: &TransitionContext<'_, X>,
) -> Result<(), TransitionError> {
    hook(subject, context).map_err(|source: HookError| {
        warn!(
            id = %context.id,
            from = context.from,
            to = context.to,
            %stage,
            error = %source,
            "transition hook failed"
        );
        TransitionError::Hook { stage, source }
    })
}
