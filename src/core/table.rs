//! Transition table mapping (state, trigger) pairs to transitions.

use super::error::TableError;
use super::state::StateNode;
use super::transition::{Transition, RESERVED_PREFIX};
use std::collections::HashMap;

/// Lookup structure for a machine definition.
///
/// Built through [`declare`](Self::declare) before the machine runs and only
/// read afterwards.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::{Transition, TransitionTable};
///
/// let mut table = TransitionTable::new();
/// table.declare(Transition::new("state 1", "state 2", "walk")).unwrap();
///
/// assert!(table.contains_state("state 2"));
/// assert_eq!(table.lookup("state 1", "walk").map(|t| t.to()), Some("state 2"));
/// assert!(table.lookup("state 2", "walk").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    states: HashMap<String, StateNode>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a transition, creating its source and target states on first
    /// reference.
    ///
    /// Fails if the trigger is empty, lies in the reserved namespace, or if
    /// the source state already handles it.
    pub fn declare(&mut self, transition: Transition) -> Result<(), TableError> {
        let trigger = transition.trigger();
        if trigger.is_empty() {
            return Err(TableError::EmptyTrigger);
        }
        if trigger.starts_with(RESERVED_PREFIX) {
            return Err(TableError::ReservedTrigger {
                trigger: trigger.to_string(),
            });
        }
        if self
            .states
            .get(transition.from())
            .is_some_and(|state| state.handles(trigger))
        {
            return Err(TableError::DuplicateTransition {
                state: transition.from().to_string(),
                trigger: trigger.to_string(),
            });
        }

        let target = transition.to().to_string();
        self.states
            .entry(target.clone())
            .or_insert_with(|| StateNode::new(target));
        self.states
            .entry(transition.from().to_string())
            .or_insert_with_key(|name| StateNode::new(name.clone()))
            .insert(transition);
        Ok(())
    }

    /// Find the transition for `trigger` in `state`.
    ///
    /// `None` means the trigger is not handled there, which is not an error.
    pub fn lookup(&self, state: &str, trigger: &str) -> Option<&Transition> {
        self.states.get(state)?.transition(trigger)
    }

    pub fn state(&self, name: &str) -> Option<&StateNode> {
        self.states.get(name)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.states.values().map(StateNode::transition_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walking_table() -> TransitionTable {
        let mut table = TransitionTable::new();
        table
            .declare(Transition::new("state 1", "state 2", "walk"))
            .unwrap();
        table
            .declare(Transition::new("state 2", "state 3", "walk"))
            .unwrap();
        table
            .declare(Transition::new("state 3", "state 1", "walk"))
            .unwrap();
        table
            .declare(Transition::new("state 2", "state 2", "stay"))
            .unwrap();
        table
    }

    #[test]
    fn new_table_is_empty() {
        let table = TransitionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.state_count(), 0);
        assert_eq!(table.transition_count(), 0);
    }

    #[test]
    fn declare_creates_source_and_target_states() {
        let mut table = TransitionTable::new();
        table.declare(Transition::new("a", "b", "go")).unwrap();

        assert!(table.contains_state("a"));
        assert!(table.contains_state("b"));
        assert_eq!(table.state_count(), 2);
        assert_eq!(table.state("b").map(StateNode::transition_count), Some(0));
    }

    #[test]
    fn lookup_follows_declarations() {
        let table = walking_table();

        assert_eq!(table.lookup("state 1", "walk").map(|t| t.to()), Some("state 2"));
        assert_eq!(table.lookup("state 2", "stay").map(|t| t.to()), Some("state 2"));
        assert_eq!(table.lookup("state 3", "walk").map(|t| t.to()), Some("state 1"));
        assert_eq!(table.transition_count(), 4);
    }

    #[test]
    fn lookup_misses_are_not_errors() {
        let table = walking_table();

        assert!(table.lookup("state 1", "stay").is_none());
        assert!(table.lookup("nowhere", "walk").is_none());
    }

    #[test]
    fn duplicate_transition_is_rejected() {
        let mut table = walking_table();
        let result = table.declare(Transition::new("state 1", "state 3", "walk"));

        assert_eq!(
            result,
            Err(TableError::DuplicateTransition {
                state: "state 1".to_string(),
                trigger: "walk".to_string(),
            })
        );
        assert_eq!(table.lookup("state 1", "walk").map(|t| t.to()), Some("state 2"));
    }

    #[test]
    fn same_trigger_in_different_states_is_allowed() {
        let mut table = TransitionTable::new();
        table.declare(Transition::new("a", "b", "next")).unwrap();

        assert!(table.declare(Transition::new("b", "a", "next")).is_ok());
    }

    #[test]
    fn empty_and_reserved_triggers_are_rejected() {
        let mut table = TransitionTable::new();

        assert_eq!(
            table.declare(Transition::new("a", "b", "")),
            Err(TableError::EmptyTrigger)
        );
        assert_eq!(
            table.declare(Transition::new("a", "b", "!kill")),
            Err(TableError::ReservedTrigger {
                trigger: "!kill".to_string()
            })
        );
        assert!(table.is_empty());
    }
}
