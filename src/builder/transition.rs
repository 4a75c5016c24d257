//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{ActionError, Handlers, Transition, TransitionAction};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// `.recover()` is only meaningful after `.action()`; calling it first makes
/// `build()` fail with [`BuildError::RecoveryWithoutAction`].
#[derive(Default)]
pub struct TransitionBuilder {
    from: Option<String>,
    to: Option<String>,
    trigger: Option<String>,
    action: Option<TransitionAction>,
    recovery: Option<TransitionAction>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Set the trigger (required).
    pub fn on(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Set the action run when the transition fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Set the recovery run if the action fails (optional).
    pub fn recover<F>(mut self, recovery: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.recovery = Some(Arc::new(recovery));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;

        let handlers = match (self.action, self.recovery) {
            (None, None) => Handlers::None,
            (Some(action), None) => Handlers::Action(action),
            (Some(action), Some(recovery)) => Handlers::ActionWithRecovery { action, recovery },
            (None, Some(_)) => return Err(BuildError::RecoveryWithoutAction),
        };

        Ok(Transition::new(from, to, trigger).with_handlers(handlers))
    }
}
