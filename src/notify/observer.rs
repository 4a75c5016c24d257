//! Observer trait and observer identity.

use super::event::Event;
use std::sync::Arc;

/// Receiver of machine lifecycle events.
///
/// `notify` runs on a delivery thread owned by the notifier, never on the
/// processing loop. A panic inside `notify` is caught and logged.
///
/// Closures taking `&Event` implement this trait.
///
/// # Example
///
/// ```rust
/// use statekeeper::notify::{Event, EventKind, Observer};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct FailureCounter(AtomicUsize);
///
/// impl Observer for FailureCounter {
///     fn notify(&self, event: &Event) {
///         if event.kind == EventKind::Inconsistency {
///             self.0.fetch_add(1, Ordering::SeqCst);
///         }
///     }
/// }
/// ```
pub trait Observer: Send + Sync {
    fn notify(&self, event: &Event);
}

impl<F> Observer for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn notify(&self, event: &Event) {
        self(event)
    }
}

/// Address of the observer behind `observer`, ignoring any vtable.
pub(crate) fn identity<O: ?Sized>(observer: &Arc<O>) -> *const () {
    Arc::as_ptr(observer).cast::<()>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MachineId;
    use std::sync::Mutex;

    #[test]
    fn closures_are_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = move |event: &Event| sink.lock().unwrap().push(event.state.clone());

        observer.notify(&Event::state_reached(MachineId::new(), "go", "b"));

        assert_eq!(*seen.lock().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn identity_ignores_trait_object_coercion() {
        let concrete = Arc::new(|_: &Event| {});
        let erased: Arc<dyn Observer> = concrete.clone();
        let other: Arc<dyn Observer> = Arc::new(|_: &Event| {});

        assert_eq!(identity(&concrete), identity(&erased));
        assert_ne!(identity(&erased), identity(&other));
    }
}
