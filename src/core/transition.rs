//! Transition descriptors and their optional handlers.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Prefix of the trigger namespace reserved for engine control directives.
///
/// Triggers starting with this character can neither be declared nor fired.
pub const RESERVED_PREFIX: char = '!';

/// Failure reported by an action or recovery handler.
///
/// The display text becomes the failure detail embedded in inconsistency
/// messages.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::ActionError;
///
/// let error: ActionError = "disk full".into();
/// assert_eq!(error.to_string(), "disk full");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Side-effecting operation attached to a transition.
pub type TransitionAction = Arc<dyn Fn() -> Result<(), ActionError> + Send + Sync>;

/// The handlers a transition may carry.
///
/// Only three shapes exist: nothing, an action, or an action paired with a
/// recovery. A recovery without an action cannot be expressed.
#[derive(Clone, Default)]
pub enum Handlers {
    /// Unconditional relabeling of the current state.
    #[default]
    None,

    /// Action whose failure leaves the machine in the source state.
    Action(TransitionAction),

    /// Action plus a recovery that runs only if the action fails.
    ActionWithRecovery {
        action: TransitionAction,
        recovery: TransitionAction,
    },
}

impl Handlers {
    pub fn none() -> Self {
        Self::None
    }

    pub fn action<F>(action: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::Action(Arc::new(action))
    }

    pub fn action_with_recovery<F, R>(action: F, recovery: R) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
        R: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self::ActionWithRecovery {
            action: Arc::new(action),
            recovery: Arc::new(recovery),
        }
    }

    pub fn has_action(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn has_recovery(&self) -> bool {
        matches!(self, Self::ActionWithRecovery { .. })
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Action(_) => f.write_str("Action(..)"),
            Self::ActionWithRecovery { .. } => f.write_str("ActionWithRecovery(..)"),
        }
    }
}

/// A declared move from `from` to `to` when `trigger` fires.
#[derive(Clone, Debug)]
pub struct Transition {
    from: String,
    to: String,
    trigger: String,
    handlers: Handlers,
}

impl Transition {
    /// Create a transition without handlers.
    pub fn new(from: impl Into<String>, to: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            trigger: trigger.into(),
            handlers: Handlers::None,
        }
    }

    pub fn with_handlers(mut self, handlers: Handlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transition_has_no_handlers() {
        let transition = Transition::new("idle", "busy", "start");

        assert_eq!(transition.from(), "idle");
        assert_eq!(transition.to(), "busy");
        assert_eq!(transition.trigger(), "start");
        assert!(!transition.handlers().has_action());
        assert!(!transition.handlers().has_recovery());
    }

    #[test]
    fn handlers_report_their_shape() {
        let action = Handlers::action(|| Ok(()));
        assert!(action.has_action());
        assert!(!action.has_recovery());

        let both = Handlers::action_with_recovery(|| Err("boom".into()), || Ok(()));
        assert!(both.has_action());
        assert!(both.has_recovery());
    }

    #[test]
    fn action_error_converts_from_strings() {
        let from_str: ActionError = "Action".into();
        let from_string: ActionError = String::from("Action").into();

        assert_eq!(from_str, from_string);
        assert_eq!(from_str.message(), "Action");
    }

    #[test]
    fn handlers_debug_hides_closures() {
        let handlers = Handlers::action(|| Ok(()));
        assert_eq!(format!("{handlers:?}"), "Action(..)");
    }
}
