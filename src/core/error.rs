//! Declaration errors for the transition table.

use thiserror::Error;

/// Errors raised while declaring transitions.
///
/// A failed declaration never modifies the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Transition already exists for state '{state}' on trigger '{trigger}'")]
    DuplicateTransition { state: String, trigger: String },

    #[error("Trigger name must not be empty")]
    EmptyTrigger,

    #[error("Trigger '{trigger}' uses the reserved '!' prefix and could never fire")]
    ReservedTrigger { trigger: String },
}
