//! Binding a subject type to a process-wide engine.
//!
//! Types that always use the same engine implement [`Governed`] once and
//! then ask transition questions of themselves directly.

use crate::core::{Actor, ScopeError, Subject};
use crate::engine::{Engine, TransitionError, TransitionRecord, TransitionView};

/// A subject type with its own engine.
///
/// # Example
///
/// ```
/// use std::sync::LazyLock;
/// use warden::builder::rule;
/// use warden::core::Principal;
/// use warden::engine::Engine;
/// use warden::{subject, Governed};
///
/// subject! {
///     #[derive(Debug, Default)]
///     struct Invoice {
///         state: String,
///         customer: u64,
///     }
/// }
///
/// static INVOICE_RULES: LazyLock<Engine<Invoice>> = LazyLock::new(|| {
///     Engine::builder()
///         .rule(rule("issued", "paid").actor_field("customer"))
///         .and_then(|b| b.build())
///         .expect("invoice rules are valid")
/// });
///
/// impl Governed for Invoice {
///     type Extra = ();
///
///     fn engine() -> &'static Engine<Self> {
///         &INVOICE_RULES
///     }
/// }
///
/// let mut invoice = Invoice { state: "issued".into(), customer: 9 };
/// assert_eq!(invoice.successors(&Principal::new(9)).unwrap(), vec!["paid"]);
///
/// invoice.perform_transition(&Principal::new(9), "paid", &()).unwrap();
/// assert_eq!(invoice.state, "paid");
/// ```
pub trait Governed: Subject + Sized + 'static {
    /// Side data passed through `perform_transition` to hooks.
    type Extra: 'static;

    /// The engine governing this type.
    fn engine() -> &'static Engine<Self, Self::Extra>;

    fn successors<A: Actor + ?Sized>(&self, actor: &A) -> Result<Vec<String>, ScopeError> {
        Self::engine().successors(self, actor)
    }

    fn show_transitions<A: Actor + ?Sized>(
        &self,
        actor: &A,
    ) -> Result<Vec<TransitionView>, ScopeError> {
        Self::engine().show_transitions(self, actor)
    }

    /// Missing required fields for moving to `to`; `None` if no rule leads there.
    fn required_fields(&self, to: &str) -> Result<Option<Vec<String>>, ScopeError> {
        Self::engine().missing_fields_for(self, to)
    }

    fn perform_transition<A: Actor + ?Sized>(
        &mut self,
        actor: &A,
        to: &str,
        extra: &Self::Extra,
    ) -> Result<TransitionRecord, TransitionError> {
        Self::engine().perform_transition(self, actor, to, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::rule;
    use crate::core::Principal;
    use std::sync::LazyLock;

    crate::subject! {
        #[derive(Debug, Default)]
        struct Document {
            state: String,
            author: u64,
            reviewer: Option<u64>,
        }
    }

    static DOCUMENT_RULES: LazyLock<Engine<Document, String>> = LazyLock::new(|| {
        Engine::builder()
            .rule(rule("draft", "review").actor_field("author").require("reviewer"))
            .and_then(|b| b.rule(rule("review", "published").actor_field("reviewer")))
            .and_then(|b| b.build())
            .expect("document rules are valid")
    });

    impl Governed for Document {
        type Extra = String;

        fn engine() -> &'static Engine<Self, String> {
            &DOCUMENT_RULES
        }
    }

    fn draft() -> Document {
        Document {
            state: "draft".into(),
            author: 1,
            reviewer: None,
        }
    }

    #[test]
    fn subject_delegates_queries_to_its_engine() {
        let doc = draft();
        let author = Principal::new(1);

        assert_eq!(doc.successors(&author).unwrap(), vec!["review"]);
        assert_eq!(
            doc.required_fields("review").unwrap(),
            Some(vec!["reviewer".to_string()])
        );
        assert_eq!(doc.required_fields("published").unwrap(), None);

        let views = doc.show_transitions(&author).unwrap();
        assert_eq!(views.len(), 1);
        assert!(!views[0].can_perform);
    }

    #[test]
    fn subject_performs_through_its_engine() {
        let mut doc = draft();
        let author = Principal::new(1);

        let err = doc
            .perform_transition(&author, "review", &"submit".to_string())
            .unwrap_err();
        assert!(matches!(err, TransitionError::Requirement { .. }));

        doc.reviewer = Some(2);
        doc.perform_transition(&author, "review", &"submit".to_string())
            .unwrap();
        assert_eq!(doc.state, "review");

        doc.perform_transition(&Principal::new(2), "published", &"approve".to_string())
            .unwrap();
        assert_eq!(doc.state, "published");
    }
}
