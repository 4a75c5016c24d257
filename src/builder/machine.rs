//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::Transition;
use crate::machine::{Machine, MachineConfig};
use crate::notify::Observer;
use std::sync::Arc;

/// Builder for constructing machines with a fluent API.
///
/// The machine it produces is idle; call [`Machine::run`] to start it.
///
/// # Example
///
/// ```rust
/// use statekeeper::builder::{MachineBuilder, TransitionBuilder};
/// use statekeeper::transitions;
///
/// let machine = MachineBuilder::new()
///     .start("locked")
///     .transitions(transitions![
///         ("locked" => "unlocked", "coin"),
///         ("unlocked" => "locked", "push"),
///     ])
///     .transition(TransitionBuilder::new().from("locked").to("locked").on("push"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.start_state(), "locked");
/// assert_eq!(machine.table().transition_count(), 3);
/// ```
#[derive(Default)]
pub struct MachineBuilder {
    config: MachineConfig,
    start: Option<String>,
    transitions: Vec<Transition>,
    observers: Vec<Arc<dyn Observer>>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the start state. It is validated when the machine runs.
    pub fn start(mut self, state: impl Into<String>) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the machine.
    /// Returns an error if a transition is rejected by the table.
    pub fn build(self) -> Result<Machine, BuildError> {
        let mut machine = Machine::with_config(self.config);
        for transition in self.transitions {
            machine.add_transition(transition)?;
        }
        if let Some(start) = self.start {
            machine.set_start_state(start);
        }
        for observer in self.observers {
            machine.add_listener(observer)?;
        }
        Ok(machine)
    }
}
