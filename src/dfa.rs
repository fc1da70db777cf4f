use std::collections::HashMap;

use bit_vec::BitVec;
use log::debug;
use log::trace;

use crate::automaton::Automaton;
use crate::automaton::AutomatonError;
use crate::automaton::Label;
use crate::automaton::StateId;
use crate::matcher::Matcher;
use crate::powerset::translate_to_dfa;

/// A deterministic automaton compiled into a transition table.
///
/// States are renumbered densely; `states` maps a dense index back to the
/// original state identifier.
pub struct DfaMatcher {
    start: usize,
    states: Vec<StateId>,
    table: HashMap<(usize, char), usize>,
    finals: BitVec,
}

impl DfaMatcher {
    /// Compiles the given automaton, which is trusted to be deterministic.
    ///
    /// When a (state, symbol) pair occurs more than once the last transition
    /// wins. Epsilon transitions can never be taken on input and are ignored.
    pub fn new(automaton: &Automaton) -> DfaMatcher {
        let mut index: HashMap<StateId, usize> = HashMap::new();
        let mut states = Vec::new();
        let mut dense = |state: StateId| {
            *index.entry(state).or_insert_with(|| {
                states.push(state);
                states.len() - 1
            })
        };

        let start = dense(automaton.start());
        for &state in automaton.states() {
            dense(state);
        }

        let mut table = HashMap::new();
        for transition in automaton.transitions() {
            let from = dense(transition.source);
            let to = dense(transition.destination);
            match transition.label {
                Label::Symbol(symbol) => {
                    if let Some(previous) = table.insert((from, symbol), to) {
                        trace!("({}, '{symbol}') overwrites destination {previous}", transition.source);
                    }
                }
                Label::Epsilon => trace!("ignoring epsilon transition {:?}", transition),
            }
        }

        for &state in automaton.goal_states() {
            dense(state);
        }

        let mut finals = BitVec::from_elem(states.len(), false);
        for &state in automaton.goal_states() {
            finals.set(index[&state], true);
        }

        debug!(
            "compiled dfa with {} states and {} transitions",
            states.len(),
            table.len()
        );

        DfaMatcher {
            start,
            states,
            table,
            finals,
        }
    }

    /// Like [DfaMatcher::new], but first checks that the automaton is
    /// deterministic.
    pub fn try_new(automaton: &Automaton) -> Result<DfaMatcher, AutomatonError> {
        automaton.check_deterministic()?;
        Ok(DfaMatcher::new(automaton))
    }

    /// Translates the NFA-ε automaton and compiles the result.
    pub fn from_nfa(nfa: &Automaton) -> DfaMatcher {
        DfaMatcher::new(&translate_to_dfa(nfa))
    }

    /// Returns the original identifier of a compiled state.
    pub fn state_id(&self, state: usize) -> StateId {
        self.states[state]
    }

    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }
}

impl Matcher for DfaMatcher {
    type State = usize;

    fn start_state(&self) -> usize {
        self.start
    }

    fn next_state(&self, state: &usize, symbol: char) -> Option<usize> {
        self.table.get(&(*state, symbol)).copied()
    }

    fn is_accepting(&self, state: &usize) -> bool {
        self.finals[*state]
    }
}
