//! Transition rules: one declared edge between two states.

use super::actor::{Actor, ActorSpec};
use super::scope::{Scope, ScopeError};
use super::subject::{is_blank, Subject};
use super::violation::Violation;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// An immutable edge from one state to another, gated by actor, scope and
/// required fields.
///
/// Rules are built with [`RuleBuilder`](crate::builder::RuleBuilder) and
/// never edited afterwards. All evaluation methods are pure reads against
/// the subject.
pub struct Rule<O> {
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) actors: Vec<ActorSpec>,
    pub(crate) scope: Scope<O>,
    pub(crate) required: Vec<String>,
    pub(crate) performer: Option<String>,
}

impl<O> Rule<O> {
    /// The source state.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// The destination state.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Allowed actors. Empty means any actor.
    pub fn actors(&self) -> &[ActorSpec] {
        &self.actors
    }

    pub fn scope(&self) -> &Scope<O> {
        &self.scope
    }

    /// Declared required fields, in declaration order.
    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    /// Name of the performer whose hooks run around this transition.
    pub fn performer(&self) -> Option<&str> {
        self.performer.as_deref()
    }
}

impl<O: Subject> Rule<O> {
    /// True if no actors are listed, or any listed spec matches.
    pub fn actor_authorized<A: Actor + ?Sized>(&self, subject: &O, actor: &A) -> bool {
        self.actors.is_empty() || self.actors.iter().any(|spec| spec.matches(subject, actor))
    }

    /// True if every scope entry holds. Guard failures propagate.
    pub fn scope_passes(&self, subject: &O) -> Result<bool, ScopeError> {
        self.scope.passes(subject)
    }

    /// Required fields that are currently null or empty, in declared order.
    pub fn missing_required_fields(&self, subject: &O) -> Vec<String> {
        self.required
            .iter()
            .filter(|field| is_blank(subject.field(field).as_ref()))
            .cloned()
            .collect()
    }

    pub fn required_fields_satisfied(&self, subject: &O) -> bool {
        self.required
            .iter()
            .all(|field| !is_blank(subject.field(field).as_ref()))
    }

    /// Collect every reason the actor cannot take this rule right now.
    ///
    /// Unlike performing, this does not stop at the first problem: an
    /// unauthorized actor and each missing field are all reported.
    pub fn diagnose<A: Actor + ?Sized>(
        &self,
        subject: &O,
        actor: &A,
    ) -> Validation<(), NonEmptyVec<Violation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<Violation>>> = Vec::new();

        let authorized = if self.actor_authorized(subject, actor) {
            Validation::success(())
        } else {
            Validation::fail(Violation::Unauthorized {
                from: self.from.clone(),
                to: self.to.clone(),
            })
        };
        checks.push(authorized);

        for field in self.missing_required_fields(subject) {
            checks.push(Validation::fail(Violation::MissingField { field }));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<O> fmt::Debug for Rule<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("actors", &self.actors)
            .field("scope", &self.scope)
            .field("required", &self.required)
            .field("performer", &self.performer)
            .finish()
    }
}
