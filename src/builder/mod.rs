//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and a macro for declaring machines
//! with minimal boilerplate, as an alternative to calling
//! [`Machine::learn`](crate::Machine::learn) repeatedly.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{ActionError, Handlers, Transition};

/// Create a transition whose action must succeed for the machine to move.
///
/// # Example
///
/// ```
/// use statekeeper::builder::action_transition;
///
/// let transition = action_transition("draft", "published", "publish", || Ok(()));
/// assert!(transition.handlers().has_action());
/// ```
pub fn action_transition<F>(
    from: impl Into<String>,
    to: impl Into<String>,
    trigger: impl Into<String>,
    action: F,
) -> Transition
where
    F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
{
    Transition::new(from, to, trigger).with_handlers(Handlers::action(action))
}

/// Create a transition whose action failure is repaired by `recovery`.
pub fn recoverable_transition<F, R>(
    from: impl Into<String>,
    to: impl Into<String>,
    trigger: impl Into<String>,
    action: F,
    recovery: R,
) -> Transition
where
    F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    R: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
{
    Transition::new(from, to, trigger)
        .with_handlers(Handlers::action_with_recovery(action, recovery))
}
