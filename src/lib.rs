//! Statekeeper: an embeddable finite state machine engine
//!
//! Callers declare states, triggers and transitions; the engine serializes
//! trigger delivery on a dedicated thread, executes optional per-transition
//! actions, repairs failed actions through optional recovery handlers, and
//! publishes lifecycle events to observers without ever waiting for them.
//!
//! # Core Concepts
//!
//! - **Transitions**: `(state, trigger) -> target` with optional [`Handlers`]
//! - **Machine**: owns the table and processes one trigger at a time
//! - **Recovery**: a failed action is retried through its recovery; if that
//!   fails too, the machine stays put and reports an inconsistency
//! - **Observers**: receive [`Event`]s asynchronously on their own threads
//!
//! # Example
//!
//! ```rust
//! use statekeeper::{Event, EventKind, Handlers, Machine};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), statekeeper::MachineError> {
//! let mut machine = Machine::new();
//! machine.learn(
//!     "draft",
//!     "published",
//!     "publish",
//!     Handlers::action_with_recovery(
//!         || Err("search index unavailable".into()),
//!         || Ok(()),
//!     ),
//! )?;
//! machine.set_start_state("draft");
//! machine.add_listener(Arc::new(|event: &Event| {
//!     if event.kind == EventKind::Inconsistency {
//!         eprintln!("{}: {}", event.trigger, event.message);
//!     }
//! }))?;
//!
//! machine.run()?;
//! machine.trigger("publish")?;
//! machine.kill()?;
//! machine.join()?;
//!
//! assert_eq!(machine.current_state(), "published");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod executor;
pub mod machine;
pub mod notify;

// Re-export commonly used types
pub use crate::core::{ActionError, Handlers, Transition, TransitionTable};
pub use machine::{Machine, MachineConfig, MachineError, MachineId};
pub use notify::{Event, EventKind, Observer};
