//! Execution of a single transition and its two-tier recovery protocol.
//!
//! [`execute`] runs the handlers of a transition and reports an [`Outcome`]
//! without touching any machine. The processing loop applies the outcome:
//! it moves the machine to the target on [`Outcome::Advanced`] and leaves it
//! in the source state on [`Outcome::Inconsistent`].
//!
//! ```text
//! no action ──────────────────────────────────────────► Advanced
//! action ok ──────────────────────────────────────────► Advanced
//! action fails ─┬─ recovery ok ───────────────────────► Advanced (recovered)
//!               ├─ recovery fails ─► "Recover function failed.\n\t\t<detail>"
//!               └─ no recovery ────► "No recover function provided.\n\t\t<detail>"
//! ```

mod boundary;

pub use boundary::Failure;

use crate::core::{Handlers, Transition};

pub(crate) use boundary::panic_detail;

/// Message prefix used when the recovery handler itself fails.
pub const RECOVERY_FAILED: &str = "Recover function failed.";

/// Message prefix used when an action fails and no recovery is declared.
pub const NO_RECOVERY: &str = "No recover function provided.";

/// Result of executing one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The machine moves to `to`.
    Advanced { to: String, recovered: bool },

    /// The machine stays in its source state.
    Inconsistent { message: String },
}

impl Outcome {
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }
}

/// Run the handlers of `transition` and decide where the machine ends up.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::{Handlers, Transition};
/// use statekeeper::executor::{execute, Outcome};
///
/// let transition = Transition::new("state 1", "state 2", "walk")
///     .with_handlers(Handlers::action(|| Err("Action".into())));
///
/// assert_eq!(
///     execute(&transition),
///     Outcome::Inconsistent {
///         message: "No recover function provided.\n\t\tAction".to_string(),
///     }
/// );
/// ```
pub fn execute(transition: &Transition) -> Outcome {
    let advanced = |recovered| Outcome::Advanced {
        to: transition.to().to_string(),
        recovered,
    };

    match transition.handlers() {
        Handlers::None => advanced(false),
        Handlers::Action(action) => match boundary::guarded(action) {
            Ok(()) => advanced(false),
            Err(failure) => Outcome::Inconsistent {
                message: inconsistency_message(NO_RECOVERY, &failure),
            },
        },
        Handlers::ActionWithRecovery { action, recovery } => {
            let Err(action_failure) = boundary::guarded(action) else {
                return advanced(false);
            };
            tracing::debug!(
                trigger = transition.trigger(),
                failure = %action_failure,
                "action failed, running recovery"
            );
            match boundary::guarded(recovery) {
                Ok(()) => advanced(true),
                Err(failure) => Outcome::Inconsistent {
                    message: inconsistency_message(RECOVERY_FAILED, &failure),
                },
            }
        }
    }
}

fn inconsistency_message(prefix: &str, failure: &Failure) -> String {
    format!("{prefix}\n\t\t{failure}")
}
