//! The processing loop: one thread per running machine.

use super::id::MachineId;
use super::shared::{Lifecycle, Shared};
use crate::core::TransitionTable;
use crate::executor::{self, Outcome};
use crate::notify::{Event, Notifier};
use flume::Receiver;
use std::sync::Arc;

/// Request travelling through the intake queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Fire(String),
    Kill,
}

pub(crate) struct Processor {
    pub(crate) id: MachineId,
    pub(crate) table: Arc<TransitionTable>,
    pub(crate) shared: Arc<Shared>,
    pub(crate) notifier: Notifier,
    pub(crate) intake: Receiver<Command>,
}

impl Processor {
    /// Dequeue and process commands until a kill directive arrives or every
    /// sender is gone.
    pub(crate) fn run(self) {
        let Processor {
            id,
            table,
            shared,
            notifier,
            intake,
        } = self;

        while let Ok(command) = intake.recv() {
            match command {
                Command::Fire(trigger) => fire(id, &table, &shared, &notifier, &trigger),
                Command::Kill => {
                    shared.set_lifecycle(Lifecycle::Stopped);
                    drop(intake);
                    let state = shared.current();
                    tracing::info!(machine = %id, state = %state, "machine killed");
                    notifier.publish(Event::killed(id, state.as_str()));
                    return;
                }
            }
        }

        shared.set_lifecycle(Lifecycle::Stopped);
        tracing::debug!(machine = %id, "intake disconnected, processing loop exiting");
    }
}

fn fire(id: MachineId, table: &TransitionTable, shared: &Shared, notifier: &Notifier, trigger: &str) {
    let current = shared.current();
    let Some(transition) = table.lookup(&current, trigger) else {
        tracing::trace!(machine = %id, state = %current, trigger, "no transition, trigger ignored");
        return;
    };

    match executor::execute(transition) {
        Outcome::Advanced { to, recovered } => {
            tracing::debug!(
                machine = %id,
                trigger,
                from = %current,
                to = %to,
                recovered,
                "transition applied"
            );
            shared.set_current(to.as_str());
            notifier.publish(Event::state_reached(id, trigger, to));
        }
        Outcome::Inconsistent { message } => {
            tracing::warn!(
                machine = %id,
                trigger,
                state = %current,
                message = %message,
                "transition left machine inconsistent"
            );
            notifier.publish(Event::inconsistency(id, trigger, current.as_str(), message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Handlers, Transition};
    use crate::notify::{EventKind, Observer};
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Event>>);

    impl Observer for Recorder {
        fn notify(&self, event: &Event) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn wait_for_events(recorder: &Recorder, count: usize) -> Vec<Event> {
        let deadline = Instant::now() + Duration::from_secs(2);
        while recorder.0.lock().unwrap().len() < count && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        recorder.0.lock().unwrap().clone()
    }

    fn processor(table: TransitionTable) -> (Processor, flume::Sender<Command>, Arc<Recorder>) {
        let (tx, rx) = flume::unbounded();
        let notifier = Notifier::new("processor-test", None);
        let recorder = Arc::new(Recorder::default());
        notifier.subscribe(recorder.clone()).unwrap();
        let shared = Arc::new(Shared::new());
        shared.set_current("a");
        shared.set_lifecycle(Lifecycle::Running);
        let processor = Processor {
            id: MachineId::new(),
            table: Arc::new(table),
            shared,
            notifier,
            intake: rx,
        };
        (processor, tx, recorder)
    }

    #[test]
    fn loop_processes_in_queue_order_up_to_kill() {
        let mut table = TransitionTable::new();
        table.declare(Transition::new("a", "b", "next")).unwrap();
        table.declare(Transition::new("b", "c", "next")).unwrap();
        table.declare(Transition::new("c", "a", "next")).unwrap();
        let (processor, tx, recorder) = processor(table);
        let shared = Arc::clone(&processor.shared);

        tx.send(Command::Fire("next".to_string())).unwrap();
        tx.send(Command::Fire("next".to_string())).unwrap();
        tx.send(Command::Kill).unwrap();
        tx.send(Command::Fire("next".to_string())).unwrap();
        processor.run();

        assert_eq!(shared.current().as_str(), "c");
        assert_eq!(shared.lifecycle(), Lifecycle::Stopped);
        let kinds: Vec<EventKind> = wait_for_events(&recorder, 3)
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EventKind::StateReached, EventKind::StateReached, EventKind::Killed]
        );
    }

    #[test]
    fn unmatched_trigger_publishes_nothing() {
        let mut table = TransitionTable::new();
        table.declare(Transition::new("a", "b", "next")).unwrap();
        let (processor, tx, recorder) = processor(table);
        let shared = Arc::clone(&processor.shared);

        tx.send(Command::Fire("unknown".to_string())).unwrap();
        drop(tx);
        processor.run();

        assert_eq!(shared.current().as_str(), "a");
        assert_eq!(shared.lifecycle(), Lifecycle::Stopped);
        thread::sleep(Duration::from_millis(20));
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn inconsistency_keeps_source_state() {
        let mut table = TransitionTable::new();
        table
            .declare(
                Transition::new("a", "b", "next")
                    .with_handlers(Handlers::action(|| Err("Action".into()))),
            )
            .unwrap();
        let (processor, tx, recorder) = processor(table);
        let shared = Arc::clone(&processor.shared);

        tx.send(Command::Fire("next".to_string())).unwrap();
        drop(tx);
        processor.run();

        assert_eq!(shared.current().as_str(), "a");
        let events = wait_for_events(&recorder, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Inconsistency);
        assert_eq!(events[0].trigger, "next");
        assert_eq!(events[0].state, "a");
        assert_eq!(events[0].message, "No recover function provided.\n\t\tAction");
    }
}
