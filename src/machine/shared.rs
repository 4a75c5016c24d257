//! State shared between a machine handle and its processing loop.

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Lifecycle {
    Idle = 0,
    Running = 1,
    /// Kill directive enqueued, loop not yet stopped.
    Stopping = 2,
    Stopped = 3,
}

impl Lifecycle {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// Current state and lifecycle of one machine.
///
/// `current` is written only by the processing loop (and by `run` before
/// the loop exists); every other reader gets a lock-free snapshot.
pub(crate) struct Shared {
    current: ArcSwap<String>,
    lifecycle: AtomicU8,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(String::new()),
            lifecycle: AtomicU8::new(Lifecycle::Idle as u8),
        }
    }

    pub(crate) fn current(&self) -> Arc<String> {
        self.current.load_full()
    }

    pub(crate) fn set_current(&self, state: impl Into<String>) {
        self.current.store(Arc::new(state.into()));
    }

    pub(crate) fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_u8(self.lifecycle.load(Ordering::Acquire))
    }

    pub(crate) fn set_lifecycle(&self, lifecycle: Lifecycle) {
        self.lifecycle.store(lifecycle as u8, Ordering::Release);
    }

    /// Move from running to stopping. Only one caller can win this race.
    pub(crate) fn begin_stop(&self) -> bool {
        self.lifecycle
            .compare_exchange(
                Lifecycle::Running as u8,
                Lifecycle::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_empty_state() {
        let shared = Shared::new();

        assert_eq!(shared.lifecycle(), Lifecycle::Idle);
        assert_eq!(shared.current().as_str(), "");
    }

    #[test]
    fn begin_stop_requires_running() {
        let shared = Shared::new();
        assert!(!shared.begin_stop());

        shared.set_lifecycle(Lifecycle::Running);
        assert!(shared.begin_stop());
        assert_eq!(shared.lifecycle(), Lifecycle::Stopping);
        assert!(!shared.begin_stop());
    }

    #[test]
    fn current_state_is_replaced() {
        let shared = Shared::new();
        shared.set_current("state 1");
        let snapshot = shared.current();
        shared.set_current("state 2");

        assert_eq!(snapshot.as_str(), "state 1");
        assert_eq!(shared.current().as_str(), "state 2");
    }
}
