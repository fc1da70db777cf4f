use std::collections::BTreeSet;

use crate::automaton::Automaton;
use crate::automaton::Label;
use crate::automaton::StateId;
use crate::matcher::Matcher;
use crate::powerset;

/// Matches input directly against a non-deterministic automaton with epsilon
/// transitions.
///
/// Nothing is precompiled, every step scans the transition list. The matcher
/// keeps the destination set of the last symbol as its active states. A step
/// first takes the epsilon closure of the active states, so epsilon moves
/// after the last symbol do not count towards acceptance.
#[derive(Clone, Debug)]
pub struct NfaMatcher {
    automaton: Automaton,
}

impl NfaMatcher {
    pub fn new(automaton: Automaton) -> NfaMatcher {
        NfaMatcher { automaton }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Returns the states reachable from `state` using only epsilon transitions.
    pub fn epsilon_closure(&self, state: StateId) -> BTreeSet<StateId> {
        self.automaton.epsilon_closure(state)
    }

    /// Returns the states reached on `symbol` from the epsilon closure of
    /// `state`.
    pub fn destination_set(&self, state: StateId, symbol: char) -> BTreeSet<StateId> {
        self.advance(&BTreeSet::from([state]), symbol)
    }

    /// Translates the automaton held by this matcher into a DFA.
    pub fn translate_to_dfa(&self) -> Automaton {
        powerset::translate_to_dfa(&self.automaton)
    }

    fn advance(&self, states: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
        let closure = self.automaton.epsilon_closure_of(states);
        self.automaton.step(&closure, Label::Symbol(symbol))
    }
}

impl From<Automaton> for NfaMatcher {
    fn from(automaton: Automaton) -> Self {
        NfaMatcher::new(automaton)
    }
}

impl Matcher for NfaMatcher {
    type State = BTreeSet<StateId>;

    fn start_state(&self) -> BTreeSet<StateId> {
        BTreeSet::from([self.automaton.start()])
    }

    fn next_state(&self, states: &BTreeSet<StateId>, symbol: char) -> Option<BTreeSet<StateId>> {
        let next = self.advance(states, symbol);
        if next.is_empty() {
            None
        } else {
            Some(next)
        }
    }

    fn is_accepting(&self, states: &BTreeSet<StateId>) -> bool {
        self.automaton.contains_goal(states)
    }
}
