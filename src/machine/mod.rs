//! The running engine.
//!
//! A [`Machine`] owns its transition table, its observers and a single
//! intake queue. Running it spawns one processing thread that takes
//! requests off the queue and executes each transition to completion before
//! looking at the next, so the action, recovery and state update of one
//! transition never interleave with another.
//!
//! # Kill semantics
//!
//! A kill directive is queued like any trigger. Everything queued ahead of
//! it is processed; anything that races in behind it is not guaranteed to
//! be honored.

mod config;
mod engine;
mod error;
mod id;
mod processor;
mod shared;

pub use config::MachineConfig;
pub use engine::Machine;
pub use error::MachineError;
pub use id::MachineId;
