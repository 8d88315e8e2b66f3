//! The transition engine and its outward surface.
//!
//! An [`Engine`] answers three questions about a subject and an actor:
//! where the subject can go next, why a given move is or is not available,
//! and (when asked to) it performs the move and runs the hooks around it.
//!
//! # Key Concepts
//!
//! - **Candidate rule**: a rule from the subject's current state whose
//!   scope passes, before any actor check
//! - **Performer**: named hooks run before and after the state write
//! - **Persistence**: an optional callback run right after the state write
//!
//! Queries never fail for business reasons; they return empty results
//! instead. Only a failing scope guard surfaces as an error. Performing a
//! transition reports each failure cause as its own error variant.

mod error;
mod hooks;
mod machine;
mod options;
mod outcome;

pub use error::{HookError, HookStage, TransitionError};
pub use hooks::{HookFn, PerformerHooks};
pub use machine::Engine;
pub use options::{EngineOptions, DEFAULT_STATE_FIELD};
pub use outcome::{TransitionContext, TransitionRecord, TransitionView};
