//! Lifecycle events and their asynchronous delivery to observers.
//!
//! A machine publishes three kinds of [`Event`]: state reached, inconsistency
//! and killed. Delivery is fire-and-forget: the processing loop hands each
//! event to the [`Notifier`] and moves on to the next trigger.
//!
//! There is no ordering guarantee between different observers. A single
//! observer receives events in the order the machine published them.

mod event;
mod notifier;
mod observer;

pub use event::{Event, EventKind};
pub use notifier::Notifier;
pub use observer::Observer;
