//! Optional callbacks run around a transition's state write.

use crate::engine::error::HookError;
use crate::engine::outcome::TransitionContext;

/// Type alias for hook and persistence callbacks.
pub type HookFn<O, X> =
    Box<dyn Fn(&mut O, &TransitionContext<'_, X>) -> Result<(), HookError> + Send + Sync>;

/// Hooks registered under a performer name.
///
/// Each hook is optional; an absent hook is skipped.
///
/// # Example
///
/// ```rust
/// use warden::engine::PerformerHooks;
/// use warden::{Map, Value};
///
/// let hooks: PerformerHooks<Map<String, Value>> = PerformerHooks::new()
///     .before(|order: &mut Map<String, Value>, _ctx| {
///         order.insert("approved_by".into(), Value::from("system"));
///         Ok(())
///     });
///
/// assert!(hooks.has_before());
/// assert!(!hooks.has_after());
/// ```
pub struct PerformerHooks<O, X = ()> {
    pub(crate) before: Option<HookFn<O, X>>,
    pub(crate) after: Option<HookFn<O, X>>,
}

impl<O, X> PerformerHooks<O, X> {
    pub fn new() -> Self {
        Self {
            before: None,
            after: None,
        }
    }

    /// Run before the state field is written.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut O, &TransitionContext<'_, X>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.before = Some(Box::new(hook));
        self
    }

    /// Run after the state field is written and persisted.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut O, &TransitionContext<'_, X>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.after = Some(Box::new(hook));
        self
    }

    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after(&self) -> bool {
        self.after.is_some()
    }
}

impl<O, X> Default for PerformerHooks<O, X> {
    fn default() -> Self {
        Self::new()
    }
}
