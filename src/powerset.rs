use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::VecDeque;

use log::debug;
use log::trace;

use crate::automaton::Automaton;
use crate::automaton::Label;
use crate::automaton::StateId;
use crate::automaton::Transition;

/// Translates an NFA-ε into an equivalent DFA using the subset construction.
///
/// The DFA start state stands for the epsilon closure of the NFA start state.
/// Every other DFA state stands for the set of NFA states entered directly by
/// a symbol, and is a goal when that set holds a goal. Outgoing transitions are
/// computed from the epsilon closure of the set. The DFA start state reuses
/// the identifier of the NFA start state, the other states are numbered from
/// zero in breadth first order, skipping the start identifier. The input is not validated; a malformed NFA yields a
/// structurally valid but meaningless DFA.
pub fn translate_to_dfa(nfa: &Automaton) -> Automaton {
    let mut construction = SubsetConstruction::new(nfa);
    construction.run();
    construction.finish()
}

/// The working state of one translation. It is owned by a single call of
/// [translate_to_dfa] and dropped when the frontier is exhausted.
struct SubsetConstruction<'a> {
    nfa: &'a Automaton,
    alphabet: BTreeSet<Label>,

    // Sets that still have to be expanded, with the DFA state they map to.
    frontier: VecDeque<(BTreeSet<StateId>, StateId)>,
    discovered: HashMap<BTreeSet<StateId>, StateId>,
    next_id: StateId,

    states: BTreeSet<StateId>,
    goal_states: BTreeSet<StateId>,
    transitions: Vec<Transition>,
}

impl<'a> SubsetConstruction<'a> {
    fn new(nfa: &'a Automaton) -> Self {
        let start = nfa.start();
        let closure = nfa.epsilon_closure(start);

        let mut construction = SubsetConstruction {
            nfa,
            alphabet: nfa.alphabet(),
            frontier: VecDeque::new(),
            discovered: HashMap::new(),
            next_id: 0,
            states: BTreeSet::new(),
            goal_states: BTreeSet::new(),
            transitions: Vec::new(),
        };

        construction.add_state(closure, start);
        construction
    }

    /// Expands frontier sets breadth first until none are left.
    fn run(&mut self) {
        while let Some((key, id)) = self.frontier.pop_front() {
            trace!("expanding {id} = {key:?}");

            // Epsilon orders first, so the set is closed before any symbol is
            // stepped. The key itself stays as discovered.
            let mut set = key.clone();

            // The alphabet is cloned so that `expand` can borrow self mutably.
            for label in self.alphabet.clone() {
                self.expand(&key, &mut set, id, label);
            }
        }
    }

    fn expand(&mut self, key: &BTreeSet<StateId>, set: &mut BTreeSet<StateId>, id: StateId, label: Label) {
        let destination = self.nfa.step(set, label);
        if destination.is_empty() {
            return;
        }

        match label {
            Label::Epsilon => {
                // Merge the epsilon successors into the working set. This
                // never introduces a DFA transition.
                let closure = self.nfa.epsilon_closure_of(&destination);
                set.extend(closure);
            }
            Label::Symbol(symbol) => {
                let to = if destination == *key {
                    id
                } else if let Some(&known) = self.discovered.get(&destination) {
                    known
                } else {
                    let fresh = self.allocate();
                    self.add_state(destination, fresh);
                    fresh
                };

                trace!("{id} --[{symbol}]-> {to}");
                self.transitions.push(Transition::new(id, symbol, to));
            }
        }
    }

    /// Registers a newly discovered set as DFA state `id` and schedules it for
    /// expansion.
    fn add_state(&mut self, set: BTreeSet<StateId>, id: StateId) {
        if self.nfa.contains_goal(&set) {
            self.goal_states.insert(id);
        }

        trace!("new state {id} = {set:?}");
        self.states.insert(id);
        self.discovered.insert(set.clone(), id);
        self.frontier.push_back((set, id));
    }

    /// Returns the next unused identifier.
    fn allocate(&mut self) -> StateId {
        if self.next_id == self.nfa.start() {
            self.next_id += 1;
        }

        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn finish(self) -> Automaton {
        debug!(
            "translated nfa with {} states and {} transitions into dfa with {} states and {} transitions",
            self.nfa.states().len(),
            self.nfa.transitions().len(),
            self.states.len(),
            self.transitions.len()
        );

        Automaton::with_states(self.states, self.nfa.start(), self.goal_states, self.transitions)
    }
}
