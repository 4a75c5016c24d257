//! Usage errors raised by the machine API.

use crate::core::TableError;
use std::io;
use thiserror::Error;

/// Errors returned synchronously by [`Machine`](super::Machine) operations.
///
/// All of them indicate a caller-side mistake. Action failures are never
/// reported here; they become inconsistency events.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("No start state defined: '{name}' is not a declared state")]
    UnknownStartState { name: String },

    #[error("Machine already running")]
    AlreadyRunning,

    #[error("Machine not running")]
    NotRunning,

    #[error("Machine has been killed and cannot be restarted")]
    Terminated,

    #[error("Transitions cannot be declared once the machine has been started")]
    DefinitionSealed,

    #[error("Failed to spawn {role} thread: {source}")]
    Spawn {
        role: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Processing loop panicked")]
    LoopPanicked,
}
