//! Build errors for machine and transition builders.

use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition trigger not specified. Call .on(trigger)")]
    MissingTrigger,

    #[error("Recovery requires an action. Call .action(f) before .recover(f)")]
    RecoveryWithoutAction,

    #[error(transparent)]
    Machine(#[from] MachineError),
}
