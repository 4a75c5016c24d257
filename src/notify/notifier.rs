//! Fan-out of events to observers.
//!
//! Every subscribed observer gets its own mailbox and delivery thread, so a
//! slow or panicking observer delays only itself. Publishing never waits for
//! any observer.

use super::event::Event;
use super::observer::{identity, Observer};
use crate::executor::panic_detail;
use flume::{Receiver, Sender, TrySendError};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

struct Subscription {
    observer: Arc<dyn Observer>,
    mailbox: Sender<Arc<Event>>,
}

struct Inner {
    label: String,
    mailbox_capacity: Option<usize>,
    subscriptions: RwLock<Vec<Subscription>>,
}

/// Broadcaster holding the observer set of one machine.
///
/// Cloning yields another handle to the same observer set.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    /// Create a notifier.
    ///
    /// `label` names the delivery threads. With `mailbox_capacity` set to
    /// `None` every mailbox is unbounded; otherwise events that do not fit
    /// are dropped for that observer.
    pub fn new(label: impl Into<String>, mailbox_capacity: Option<usize>) -> Self {
        Self {
            inner: Arc::new(Inner {
                label: label.into(),
                mailbox_capacity,
                subscriptions: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Add `observer` and start its delivery thread.
    ///
    /// Returns `false` without doing anything if the same observer is
    /// already subscribed.
    pub fn subscribe(&self, observer: Arc<dyn Observer>) -> io::Result<bool> {
        let id = identity(&observer);
        if self.is_subscribed(id) {
            return Ok(false);
        }

        // Spawned before taking the write lock so publish never waits on it.
        let (mailbox, deliveries) = match self.inner.mailbox_capacity {
            Some(capacity) => flume::bounded(capacity),
            None => flume::unbounded(),
        };
        let worker = Arc::clone(&observer);
        thread::Builder::new()
            .name(format!("{}-observer", self.inner.label))
            .spawn(move || deliver(worker, deliveries))?;

        let mut subscriptions = self
            .inner
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if subscriptions.iter().any(|s| identity(&s.observer) == id) {
            // Lost a race with another subscribe; dropping `mailbox` ends the thread.
            return Ok(false);
        }
        subscriptions.push(Subscription { observer, mailbox });
        tracing::debug!(notifier = %self.inner.label, "observer subscribed");
        Ok(true)
    }

    /// Remove `observer`.
    ///
    /// Events already queued for it are still delivered before its delivery
    /// thread exits. Returns `false` if it was not subscribed.
    pub fn unsubscribe<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> bool {
        let mut subscriptions = self
            .inner
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let id = identity(observer);
        let before = subscriptions.len();
        subscriptions.retain(|s| identity(&s.observer) != id);
        let removed = subscriptions.len() != before;
        if removed {
            tracing::debug!(notifier = %self.inner.label, "observer unsubscribed");
        }
        removed
    }

    /// Queue `event` for every current observer and return immediately.
    pub fn publish(&self, event: Event) {
        let event = Arc::new(event);
        let subscriptions = self
            .inner
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for subscription in subscriptions.iter() {
            match subscription.mailbox.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => tracing::warn!(
                    notifier = %self.inner.label,
                    kind = ?event.kind,
                    "observer mailbox full, event dropped"
                ),
                Err(TrySendError::Disconnected(_)) => tracing::debug!(
                    notifier = %self.inner.label,
                    "observer delivery thread gone, event dropped"
                ),
            }
        }
    }

    fn is_subscribed(&self, id: *const ()) -> bool {
        self.inner
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|s| identity(&s.observer) == id)
    }

    pub fn observer_count(&self) -> usize {
        self.inner
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn deliver(observer: Arc<dyn Observer>, deliveries: Receiver<Arc<Event>>) {
    for event in deliveries.iter() {
        let delivered = panic::catch_unwind(AssertUnwindSafe(|| observer.notify(&event)));
        if let Err(payload) = delivered {
            tracing::warn!(
                machine = %event.machine,
                kind = ?event.kind,
                panic = %panic_detail(payload.as_ref()),
                "observer panicked during notification"
            );
        }
    }
}
