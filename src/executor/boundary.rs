//! Failure boundary around handler invocations.

use crate::core::TransitionAction;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// How a handler failed.
///
/// Both variants display as the bare failure detail, which is what the
/// inconsistency messages embed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The handler returned an error.
    #[error("{0}")]
    Error(String),

    /// The handler panicked.
    #[error("{0}")]
    Panic(String),
}

impl Failure {
    pub fn detail(&self) -> &str {
        match self {
            Self::Error(detail) | Self::Panic(detail) => detail,
        }
    }
}

/// Run `handler`, converting both returned errors and panics into a
/// [`Failure`].
pub(crate) fn guarded(handler: &TransitionAction) -> Result<(), Failure> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(Failure::Error(error.to_string())),
        Err(payload) => Err(Failure::Panic(panic_detail(payload.as_ref()))),
    }
}

pub(crate) fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionError;
    use std::sync::Arc;

    fn handler<F>(f: F) -> TransitionAction
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Arc::new(f)
    }

    #[test]
    fn successful_handler_passes() {
        let action = handler(|| Ok(()));
        assert_eq!(guarded(&action), Ok(()));
    }

    #[test]
    fn returned_error_becomes_failure() {
        let action = handler(|| Err("Action".into()));
        assert_eq!(guarded(&action), Err(Failure::Error("Action".to_string())));
    }

    #[test]
    fn panic_is_caught() {
        let action = handler(|| panic!("Recovery"));
        let failure = guarded(&action).unwrap_err();

        assert_eq!(failure, Failure::Panic("Recovery".to_string()));
        assert_eq!(failure.detail(), "Recovery");
    }

    #[test]
    fn formatted_panic_payload_is_kept() {
        let action = handler(|| panic!("code {}", 7));
        assert_eq!(guarded(&action), Err(Failure::Panic("code 7".to_string())));
    }

    #[test]
    fn opaque_payload_has_placeholder_detail() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_detail(payload.as_ref()), "unknown panic");
    }
}
