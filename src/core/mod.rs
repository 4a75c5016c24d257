//! Machine definitions: states, transitions and the table that indexes them.
//!
//! Everything in this module is plain data. Executing transitions is the
//! job of [`crate::executor`], and running a definition is the job of
//! [`crate::machine`].

mod error;
mod state;
mod table;
mod transition;

pub use error::TableError;
pub use state::StateNode;
pub use table::TransitionTable;
pub use transition::{ActionError, Handlers, Transition, TransitionAction, RESERVED_PREFIX};
