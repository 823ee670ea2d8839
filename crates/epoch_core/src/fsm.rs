//! State Machine Runtime
//!
//! Flat, typed state machines for component lifecycles (drag sessions,
//! modal phases). Supports:
//! - Named states and events (any `Copy + Eq` type, usually an enum)
//! - Guarded transitions
//! - Bounded transition history
//!
//! Instead of entry/exit callbacks, [`StateMachine::send`] returns the
//! [`StateChange`] that happened so the owning component can run its own
//! ordered side effects with full access to its state.

use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt::Debug;

/// A guard that determines if a transition may fire
pub type Guard = fn() -> bool;

const HISTORY_LIMIT: usize = 32;

/// A transition in the state machine
#[derive(Clone, Debug)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    pub guard: Option<Guard>,
}

impl<S, E> Transition<S, E> {
    /// Create a simple transition without a guard
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
        }
    }

    /// Add a guard condition
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    fn allows(&self) -> bool {
        self.guard.map_or(true, |guard| guard())
    }
}

/// A transition that actually fired
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange<S, E> {
    pub from: S,
    pub event: E,
    pub to: S,
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
}

impl<S: Copy + Eq + Debug, E: Copy + Eq + Debug> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: VecDeque::new(),
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
    /// Most recent transitions, oldest first (for diagnostics)
    history: VecDeque<StateChange<S, E>>,
}

impl<S: Copy + Eq + Debug, E: Copy + Eq + Debug> StateMachine<S, E> {
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Recent transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &StateChange<S, E>> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: E) -> bool {
        self.find(event).is_some()
    }

    /// Send an event; returns the change if a transition fired.
    ///
    /// Events with no matching transition from the current state are ignored.
    pub fn send(&mut self, event: E) -> Option<StateChange<S, E>> {
        let idx = self.find(event)?;
        let change = StateChange {
            from: self.current_state,
            event,
            to: self.transitions[idx].to_state,
        };
        self.current_state = change.to;

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(change);

        tracing::trace!(from = ?change.from, event = ?change.event, to = ?change.to, "fsm transition");
        Some(change)
    }

    fn find(&self, event: E) -> Option<usize> {
        let current = self.current_state;
        self.transitions
            .iter()
            .position(|t| t.from_state == current && t.event == event && t.allows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum State {
        Idle,
        Dragging,
        Releasing,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Ev {
        Grab,
        Release,
        Settle,
    }

    fn drag_machine() -> StateMachine<State, Ev> {
        StateMachine::builder(State::Idle)
            .on(State::Idle, Ev::Grab, State::Dragging)
            .on(State::Dragging, Ev::Release, State::Releasing)
            .on(State::Releasing, Ev::Settle, State::Idle)
            .on(State::Releasing, Ev::Grab, State::Dragging)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = drag_machine();
        assert_eq!(fsm.current_state(), State::Idle);

        fsm.send(Ev::Grab);
        assert!(fsm.is_in(State::Dragging));

        fsm.send(Ev::Release);
        assert!(fsm.is_in(State::Releasing));

        fsm.send(Ev::Settle);
        assert!(fsm.is_in(State::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = drag_machine();
        assert_eq!(fsm.send(Ev::Release), None);
        assert_eq!(fsm.current_state(), State::Idle);
    }

    #[test]
    fn test_send_reports_change() {
        let mut fsm = drag_machine();
        let change = fsm.send(Ev::Grab).unwrap();
        assert_eq!(
            change,
            StateChange {
                from: State::Idle,
                event: Ev::Grab,
                to: State::Dragging
            }
        );
    }

    #[test]
    fn test_guard_conditions() {
        fn never() -> bool {
            false
        }
        let mut fsm: StateMachine<State, Ev> = StateMachine::builder(State::Idle)
            .transition(Transition::new(State::Idle, Ev::Grab, State::Dragging).with_guard(never))
            .build();

        assert!(!fsm.can_send(Ev::Grab));
        fsm.send(Ev::Grab);
        assert_eq!(fsm.current_state(), State::Idle);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = drag_machine();
        for _ in 0..40 {
            fsm.send(Ev::Grab);
            fsm.send(Ev::Release);
        }
        assert_eq!(fsm.history().count(), HISTORY_LIMIT);
        let last = fsm.history().last().unwrap();
        assert_eq!(last.to, State::Releasing);
    }
}
