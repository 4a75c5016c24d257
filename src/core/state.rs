//! States of a machine definition.
//!
//! A state is identified by its name and owns the transitions leaving it,
//! keyed by trigger. States are never created explicitly; the table creates
//! one the first time a name appears as a source or a target.

use super::transition::Transition;
use std::collections::HashMap;

/// A named state and its outgoing transitions.
#[derive(Clone, Debug)]
pub struct StateNode {
    name: String,
    transitions: HashMap<String, Transition>,
}

impl StateNode {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: HashMap::new(),
        }
    }

    /// Get the state's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the transition fired by `trigger`, if this state handles it.
    pub fn transition(&self, trigger: &str) -> Option<&Transition> {
        self.transitions.get(trigger)
    }

    /// Check whether this state handles `trigger`.
    pub fn handles(&self, trigger: &str) -> bool {
        self.transitions.contains_key(trigger)
    }

    /// Number of outgoing transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn insert(&mut self, transition: Transition) {
        self.transitions
            .insert(transition.trigger().to_string(), transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_no_transitions() {
        let state = StateNode::new("state 1");

        assert_eq!(state.name(), "state 1");
        assert_eq!(state.transition_count(), 0);
        assert!(state.transition("walk").is_none());
    }

    #[test]
    fn insert_keys_by_trigger() {
        let mut state = StateNode::new("state 2");
        state.insert(Transition::new("state 2", "state 3", "walk"));
        state.insert(Transition::new("state 2", "state 2", "stay"));

        assert_eq!(state.transition_count(), 2);
        assert!(state.handles("walk"));
        assert!(state.handles("stay"));
        assert!(!state.handles("run"));
        assert_eq!(state.transition("stay").map(|t| t.to()), Some("state 2"));
    }
}
