//! The machine handle: declaration, lifecycle and trigger intake.

use super::config::MachineConfig;
use super::error::MachineError;
use super::id::MachineId;
use super::processor::{Command, Processor};
use super::shared::{Lifecycle, Shared};
use crate::core::{Handlers, Transition, TransitionTable, RESERVED_PREFIX};
use crate::notify::{Event, Notifier, Observer};
use flume::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// A finite state machine that processes triggers on its own thread.
///
/// Transitions are declared while the machine is idle. [`run`](Self::run)
/// enters the start state and spawns the processing loop; from then on
/// [`trigger`](Self::trigger) feeds the loop, which executes one transition
/// at a time. [`kill`](Self::kill) stops the loop for good.
///
/// The state is updated asynchronously: `current_state` returns a snapshot
/// that may not yet reflect triggers accepted a moment ago.
///
/// # Example
///
/// ```rust
/// use statekeeper::{Handlers, Machine};
///
/// # fn main() -> Result<(), statekeeper::MachineError> {
/// let mut machine = Machine::new();
/// machine.learn("state 1", "state 2", "walk", Handlers::none())?;
/// machine.learn("state 2", "state 3", "walk", Handlers::none())?;
/// machine.learn("state 3", "state 1", "walk", Handlers::none())?;
/// machine.learn("state 2", "state 2", "stay", Handlers::none())?;
/// machine.set_start_state("state 1");
///
/// machine.run()?;
/// assert_eq!(machine.current_state(), "state 1");
///
/// machine.trigger("walk")?.trigger("stay")?;
/// machine.kill()?;
/// machine.join()?;
/// assert_eq!(machine.current_state(), "state 2");
/// # Ok(())
/// # }
/// ```
pub struct Machine {
    id: MachineId,
    config: MachineConfig,
    start_state: String,
    table: Arc<TransitionTable>,
    shared: Arc<Shared>,
    notifier: Notifier,
    intake: Option<Sender<Command>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Machine {
    /// Create an idle machine with no states and the default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        let id = MachineId::new();
        let notifier = Notifier::new(label(&config, id), config.observer_mailbox_capacity);
        Self {
            id,
            config,
            start_state: String::new(),
            table: Arc::new(TransitionTable::new()),
            shared: Arc::new(Shared::new()),
            notifier,
            intake: None,
            worker: Mutex::new(None),
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Declare a transition from `from` to `to` fired by `trigger`.
    ///
    /// Both states are created if they have not been seen before.
    pub fn learn(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        trigger: impl Into<String>,
        handlers: Handlers,
    ) -> Result<(), MachineError> {
        self.add_transition(Transition::new(from, to, trigger).with_handlers(handlers))
    }

    /// Declare a pre-built transition.
    pub fn add_transition(&mut self, transition: Transition) -> Result<(), MachineError> {
        if self.shared.lifecycle() != Lifecycle::Idle {
            return Err(MachineError::DefinitionSealed);
        }
        let table = Arc::get_mut(&mut self.table).ok_or(MachineError::DefinitionSealed)?;
        table.declare(transition)?;
        Ok(())
    }

    /// Record the state `run` will enter. The name is checked by `run`.
    pub fn set_start_state(&mut self, state: impl Into<String>) {
        self.start_state = state.into();
    }

    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    /// Snapshot of the current state; empty before the machine has run.
    pub fn current_state(&self) -> String {
        self.shared.current().as_str().to_string()
    }

    pub fn is_running(&self) -> bool {
        self.shared.lifecycle() == Lifecycle::Running
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Enter the start state and spawn the processing loop.
    ///
    /// Does nothing if no transition has been declared.
    pub fn run(&mut self) -> Result<(), MachineError> {
        if self.table.is_empty() {
            tracing::debug!(machine = %self.id, "no transitions declared, run ignored");
            return Ok(());
        }
        match self.shared.lifecycle() {
            Lifecycle::Idle => {}
            Lifecycle::Running | Lifecycle::Stopping => return Err(MachineError::AlreadyRunning),
            Lifecycle::Stopped => return Err(MachineError::Terminated),
        }
        if !self.table.contains_state(&self.start_state) {
            return Err(MachineError::UnknownStartState {
                name: self.start_state.clone(),
            });
        }

        self.shared.set_current(self.start_state.as_str());
        let (intake, requests) = flume::bounded(self.config.intake_capacity);
        let processor = Processor {
            id: self.id,
            table: Arc::clone(&self.table),
            shared: Arc::clone(&self.shared),
            notifier: self.notifier.clone(),
            intake: requests,
        };
        let worker = thread::Builder::new()
            .name(label(&self.config, self.id))
            .spawn(move || processor.run())
            .map_err(|source| MachineError::Spawn {
                role: "processing",
                source,
            })?;

        self.notifier
            .publish(Event::state_reached(self.id, "", self.start_state.as_str()));
        self.shared.set_lifecycle(Lifecycle::Running);
        self.intake = Some(intake);
        *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(worker);

        tracing::info!(machine = %self.id, state = %self.start_state, "machine started");
        Ok(())
    }

    /// Submit `trigger` to the processing loop.
    ///
    /// Names in the reserved `!` namespace are ignored, even on a machine
    /// that is not running. This call blocks while the intake queue is full,
    /// so it must never be made from an action or recovery of the same
    /// machine.
    pub fn trigger(&self, trigger: &str) -> Result<&Self, MachineError> {
        if trigger.starts_with(RESERVED_PREFIX) {
            tracing::trace!(machine = %self.id, trigger, "reserved trigger ignored");
            return Ok(self);
        }
        self.submit(Command::Fire(trigger.to_string()))?;
        Ok(self)
    }

    /// Ask the processing loop to stop.
    ///
    /// Triggers queued before the kill are still processed; once this
    /// returns, every further `trigger` or `kill` fails with
    /// [`MachineError::NotRunning`]. Like `trigger`, this may block on the
    /// intake queue, so it must never be made from an action or recovery of
    /// the same machine.
    pub fn kill(&self) -> Result<(), MachineError> {
        if !self.shared.begin_stop() {
            return Err(MachineError::NotRunning);
        }
        let intake = self.intake.as_ref().ok_or(MachineError::NotRunning)?;
        intake
            .send(Command::Kill)
            .map_err(|_| MachineError::NotRunning)
    }

    /// Wait for the processing loop to exit.
    ///
    /// Returns immediately if the loop was never started or has already
    /// been joined. Concurrent callers all wait until the loop has exited.
    pub fn join(&self) -> Result<(), MachineError> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        match worker.take() {
            Some(handle) => handle.join().map_err(|_| MachineError::LoopPanicked),
            None => Ok(()),
        }
    }

    /// Subscribe `observer` to this machine's events.
    ///
    /// Adding an observer that is already subscribed does nothing.
    pub fn add_listener(&self, observer: Arc<dyn Observer>) -> Result<(), MachineError> {
        self.notifier
            .subscribe(observer)
            .map(|_| ())
            .map_err(|source| MachineError::Spawn {
                role: "observer",
                source,
            })
    }

    /// Unsubscribe `observer`. Returns `false` if it was not subscribed.
    pub fn remove_listener<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> bool {
        self.notifier.unsubscribe(observer)
    }

    fn submit(&self, command: Command) -> Result<(), MachineError> {
        if !self.is_running() {
            return Err(MachineError::NotRunning);
        }
        let intake = self.intake.as_ref().ok_or(MachineError::NotRunning)?;
        intake.send(command).map_err(|_| MachineError::NotRunning)
    }
}

/// Name of the processing thread; observer threads derive theirs from it.
fn label(config: &MachineConfig, id: MachineId) -> String {
    match &config.name {
        Some(name) => format!("fsm-{name}"),
        None => format!("fsm-{}", id.short()),
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
