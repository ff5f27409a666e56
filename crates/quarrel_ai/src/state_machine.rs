//! Finite State Machine (FSM) implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A state in the state machine
pub trait State: Clone + Eq + Hash + Debug {}

impl<T> State for T where T: Clone + Eq + Hash + Debug {}

/// Transition condition
pub type TransitionCondition<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// A state transition
pub struct Transition<S, C> {
    /// Target state
    pub to: S,
    /// Condition function
    pub condition: TransitionCondition<C>,
}

impl<S, C> Transition<S, C> {
    /// Create a new transition
    pub fn new<F>(to: S, condition: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            to,
            condition: Box::new(condition),
        }
    }

    /// Check if transition should occur
    pub fn should_transition(&self, context: &C) -> bool {
        (self.condition)(context)
    }
}

/// A transition that happened during [`StateMachine::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange<S> {
    pub from: S,
    pub to: S,
}

/// Finite State Machine.
///
/// Holds no behavior of its own: [`update`](Self::update) reports the
/// transition it took and the owner performs the matching action.
pub struct StateMachine<S, C>
where
    S: State,
{
    current: S,
    /// Transitions from each state, checked in insertion order
    transitions: HashMap<S, Vec<Transition<S, C>>>,
    /// Checked from any state, before state-specific ones
    global_transitions: Vec<Transition<S, C>>,
}

impl<S, C> StateMachine<S, C>
where
    S: State,
{
    /// Create a new state machine
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: HashMap::new(),
            global_transitions: Vec::new(),
        }
    }

    /// Add a transition
    pub fn add_transition<F>(&mut self, from: S, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition::new(to, condition));
    }

    /// Add a global transition (can occur from any state except its target)
    pub fn add_global_transition<F>(&mut self, to: S, condition: F)
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.global_transitions.push(Transition::new(to, condition));
    }

    /// Get current state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Force transition to a state
    pub fn force_transition(&mut self, to: S) -> StateChange<S> {
        log::trace!("StateMachine::force_transition: {:?} -> {:?}", self.current, to);
        let from = std::mem::replace(&mut self.current, to.clone());
        StateChange { from, to }
    }

    /// Update the state machine, taking at most one transition
    pub fn update(&mut self, context: &C) -> Option<StateChange<S>> {
        let global = self
            .global_transitions
            .iter()
            .find(|t| self.current != t.to && t.should_transition(context))
            .map(|t| t.to.clone());
        if let Some(to) = global {
            return Some(self.force_transition(to));
        }

        let local = self
            .transitions
            .get(&self.current)
            .and_then(|list| list.iter().find(|t| t.should_transition(context)))
            .map(|t| t.to.clone());
        local.map(|to| self.force_transition(to))
    }

    /// Check if in a specific state
    pub fn is_in(&self, state: &S) -> bool {
        &self.current == state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestState {
        Dormant,
        Awake,
        Aggro,
        Dying,
    }

    #[derive(Default)]
    struct Senses {
        visible: bool,
        blocked: bool,
        dead: bool,
    }

    fn enemy_fsm() -> StateMachine<TestState, Senses> {
        let mut fsm = StateMachine::new(TestState::Dormant);
        fsm.add_transition(TestState::Dormant, TestState::Awake, |s: &Senses| s.visible);
        fsm.add_transition(TestState::Awake, TestState::Aggro, |s: &Senses| !s.blocked);
        fsm.add_global_transition(TestState::Dying, |s: &Senses| s.dead);
        fsm
    }

    #[test]
    fn test_transitions_report_change() {
        let mut fsm = enemy_fsm();
        let mut senses = Senses::default();

        assert_eq!(fsm.update(&senses), None);
        assert!(fsm.is_in(&TestState::Dormant));

        senses.visible = true;
        senses.blocked = true;
        assert_eq!(
            fsm.update(&senses),
            Some(StateChange {
                from: TestState::Dormant,
                to: TestState::Awake
            })
        );

        // One transition per update, and blocked holds us here
        assert_eq!(fsm.update(&senses), None);

        senses.blocked = false;
        fsm.update(&senses);
        assert!(fsm.is_in(&TestState::Aggro));
    }

    #[test]
    fn test_global_transition_wins_and_fires_once() {
        let mut fsm = enemy_fsm();
        let senses = Senses {
            visible: true,
            blocked: false,
            dead: true,
        };

        let change = fsm.update(&senses).unwrap();
        assert_eq!(change.to, TestState::Dying);
        assert_eq!(fsm.update(&senses), None);
    }

    #[test]
    fn test_first_added_transition_wins() {
        let mut fsm = StateMachine::<TestState, Senses>::new(TestState::Dormant);
        fsm.add_transition(TestState::Dormant, TestState::Awake, |_| true);
        fsm.add_transition(TestState::Dormant, TestState::Aggro, |_| true);

        let change = fsm.update(&Senses::default()).unwrap();
        assert_eq!(change.to, TestState::Awake);
    }

    #[test]
    fn test_force_transition_reports_change() {
        let mut fsm = enemy_fsm();
        let change = fsm.force_transition(TestState::Aggro);
        assert_eq!(change.from, TestState::Dormant);
        assert!(fsm.is_in(&TestState::Aggro));
        assert_eq!(fsm.update(&Senses::default()), None);
    }
}
