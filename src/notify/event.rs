//! Lifecycle events published by a machine.

use crate::machine::MachineId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An action failed and was not recovered; the state did not change.
    Inconsistency,

    /// The machine entered a state, either at start or after a transition.
    StateReached,

    /// The processing loop stopped after a kill directive.
    Killed,
}

/// Immutable record of a notable occurrence in a machine.
///
/// `trigger` is empty for machine-level events (start and kill), and
/// `message` is populated only for [`EventKind::Inconsistency`]. The event
/// published by `run` therefore names the start state in `state`, not in
/// `trigger`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The machine that produced the event.
    pub machine: MachineId,
    pub kind: EventKind,
    /// The trigger that caused the event.
    pub trigger: String,
    /// Human-readable explanation of an inconsistency.
    pub message: String,
    /// The machine's state once the event was produced.
    pub state: String,
    pub occurred_at: DateTime<Utc>,
}

impl Event {
    pub(crate) fn state_reached(
        machine: MachineId,
        trigger: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self::new(machine, EventKind::StateReached, trigger.into(), String::new(), state.into())
    }

    pub(crate) fn inconsistency(
        machine: MachineId,
        trigger: impl Into<String>,
        state: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            machine,
            EventKind::Inconsistency,
            trigger.into(),
            message.into(),
            state.into(),
        )
    }

    pub(crate) fn killed(machine: MachineId, state: impl Into<String>) -> Self {
        Self::new(machine, EventKind::Killed, String::new(), String::new(), state.into())
    }

    fn new(
        machine: MachineId,
        kind: EventKind,
        trigger: String,
        message: String,
        state: String,
    ) -> Self {
        Self {
            machine,
            kind,
            trigger,
            message,
            state,
            occurred_at: Utc::now(),
        }
    }

    /// Check whether this event came from a machine-level occurrence rather
    /// than a trigger.
    pub fn is_machine_level(&self) -> bool {
        self.trigger.is_empty()
    }
}
