//! State Machine Runtime
//!
//! Flat, typed state machines for coordinator lifecycle and motion states.
//! Supports:
//! - Transition tables expressed as `StateTransitions::on_event`
//! - Entry actions
//! - Bounded transition history (for debugging)

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Maximum number of transitions kept in history
const HISTORY_LIMIT: usize = 64;

/// A state type that knows its own transition table
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Terminal states accept no further events
    fn is_terminal(&self) -> bool {
        false
    }
}

/// An action executed when a state is entered
pub type Action<S> = Box<dyn FnMut(S)>;

/// A state machine instance
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    entry_callbacks: Vec<(S, Action<S>)>,
    /// History of state transitions (for debugging)
    history: VecDeque<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine with an initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            entry_callbacks: Vec::new(),
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventType, S)> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        !self.current_state.is_terminal() && self.current_state.on_event(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition
    pub fn send(&mut self, event: EventType) -> S {
        let current = self.current_state;
        if current.is_terminal() {
            return current;
        }

        let Some(to_state) = current.on_event(event) else {
            return current;
        };

        if to_state == current {
            return current;
        }

        self.current_state = to_state;
        tracing::trace!("fsm {:?} --{}--> {:?}", current, event, to_state);

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, event, to_state));

        for (state, callback) in self.entry_callbacks.iter_mut() {
            if *state == to_state {
                callback(to_state);
            }
        }

        to_state
    }

    /// Register an entry callback for a state
    pub fn on_enter<F: FnMut(S) + 'static>(&mut self, state: S, callback: F) {
        self.entry_callbacks.push((state, Box::new(callback)));
    }
}
