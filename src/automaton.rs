use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;
use std::iter;

use log::trace;
use thiserror::Error;

/// The identifier of a state. Carries no meaning beyond identity.
pub type StateId = usize;

/// The label of a transition, either a single input symbol or epsilon.
///
/// `Epsilon` orders before every symbol.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Label {
    Epsilon,
    Symbol(char),
}

/// The label of transitions that are taken without consuming input.
pub const EPSILON: Label = Label::Epsilon;

impl Label {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    /// Returns the input symbol, or `None` for epsilon.
    pub fn symbol(&self) -> Option<char> {
        match *self {
            Label::Epsilon => None,
            Label::Symbol(symbol) => Some(symbol),
        }
    }
}

impl From<char> for Label {
    fn from(symbol: char) -> Self {
        Label::Symbol(symbol)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// A labelled edge from `source` to `destination`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Transition {
    pub source: StateId,
    pub label: Label,
    pub destination: StateId,
}

impl Transition {
    pub fn new(source: StateId, label: impl Into<Label>, destination: StateId) -> Self {
        Transition {
            source,
            label: label.into(),
            destination,
        }
    }

    pub fn epsilon(source: StateId, destination: StateId) -> Self {
        Transition {
            source,
            label: EPSILON,
            destination,
        }
    }
}

/// Violations found when an automaton is checked for determinism.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("deterministic automaton has an epsilon transition from state {state} to {destination}")]
    EpsilonTransition { state: StateId, destination: StateId },

    #[error("state {state} has transitions on '{symbol}' to both {first} and {second}")]
    DuplicateTransition {
        state: StateId,
        symbol: char,
        first: StateId,
        second: StateId,
    },
}

/// A finite automaton, deterministic or non-deterministic with epsilon
/// transitions. The automaton does not check that it is well-formed for the
/// way it is used.
///
/// The state set is advisory, the matchers only look at the start state, the
/// goal states and the transitions. Transformations produce new automata, an
/// automaton is never changed after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton {
    states: BTreeSet<StateId>,
    start: StateId,
    goal_states: BTreeSet<StateId>,
    transitions: Vec<Transition>,
}

impl Automaton {
    /// Creates an automaton whose state set consists of the start state, the
    /// goal states and every state mentioned by a transition.
    pub fn new<G, T>(start: StateId, goal_states: G, transitions: T) -> Automaton
    where
        G: IntoIterator<Item = StateId>,
        T: IntoIterator<Item = Transition>,
    {
        let goal_states: BTreeSet<StateId> = goal_states.into_iter().collect();
        let transitions: Vec<Transition> = transitions.into_iter().collect();

        let states = iter::once(start)
            .chain(goal_states.iter().copied())
            .chain(transitions.iter().flat_map(|t| [t.source, t.destination]))
            .collect();

        Automaton {
            states,
            start,
            goal_states,
            transitions,
        }
    }

    /// Creates an automaton with an explicitly given state set.
    pub fn with_states<S, G, T>(states: S, start: StateId, goal_states: G, transitions: T) -> Automaton
    where
        S: IntoIterator<Item = StateId>,
        G: IntoIterator<Item = StateId>,
        T: IntoIterator<Item = Transition>,
    {
        Automaton {
            states: states.into_iter().collect(),
            start,
            goal_states: goal_states.into_iter().collect(),
            transitions: transitions.into_iter().collect(),
        }
    }

    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn goal_states(&self) -> &BTreeSet<StateId> {
        &self.goal_states
    }

    /// Returns the transitions in the order they were given.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_goal(&self, state: StateId) -> bool {
        self.goal_states.contains(&state)
    }

    /// Returns true iff any of the given states is a goal state.
    pub fn contains_goal<'a, I>(&self, states: I) -> bool
    where
        I: IntoIterator<Item = &'a StateId>,
    {
        states.into_iter().any(|state| self.is_goal(*state))
    }

    /// Returns every distinct label used by a transition, epsilon included.
    pub fn alphabet(&self) -> BTreeSet<Label> {
        self.transitions.iter().map(|t| t.label).collect()
    }

    /// Returns the states reachable from `state` using only epsilon
    /// transitions, `state` itself included.
    pub fn epsilon_closure(&self, state: StateId) -> BTreeSet<StateId> {
        self.epsilon_closure_of(iter::once(&state))
    }

    /// Returns the union of the epsilon closures of the given states.
    pub fn epsilon_closure_of<'a, I>(&self, states: I) -> BTreeSet<StateId>
    where
        I: IntoIterator<Item = &'a StateId>,
    {
        // Depth first search over epsilon edges, the closure doubles as the visited set.
        let mut closure: BTreeSet<StateId> = BTreeSet::new();
        let mut stack = Vec::new();

        for &state in states {
            if closure.insert(state) {
                stack.push(state);
            }
        }

        while let Some(state) = stack.pop() {
            for transition in &self.transitions {
                if transition.source == state
                    && transition.label.is_epsilon()
                    && closure.insert(transition.destination)
                {
                    stack.push(transition.destination);
                }
            }
        }

        trace!("epsilon closure {closure:?}");
        closure
    }

    /// Returns every state reachable from one of `states` by a single
    /// transition labelled `label`.
    pub fn step(&self, states: &BTreeSet<StateId>, label: Label) -> BTreeSet<StateId> {
        self.transitions
            .iter()
            .filter(|t| t.label == label && states.contains(&t.source))
            .map(|t| t.destination)
            .collect()
    }

    /// Checks that every (state, symbol) pair has at most one destination and
    /// that there are no epsilon transitions.
    pub fn check_deterministic(&self) -> Result<(), AutomatonError> {
        let mut seen: HashMap<(StateId, char), StateId> = HashMap::new();

        for transition in &self.transitions {
            let symbol = match transition.label {
                Label::Epsilon => {
                    return Err(AutomatonError::EpsilonTransition {
                        state: transition.source,
                        destination: transition.destination,
                    })
                }
                Label::Symbol(symbol) => symbol,
            };

            if let Some(&first) = seen.get(&(transition.source, symbol)) {
                if first != transition.destination {
                    return Err(AutomatonError::DuplicateTransition {
                        state: transition.source,
                        symbol,
                        first,
                        second: transition.destination,
                    });
                }
            } else {
                seen.insert((transition.source, symbol), transition.destination);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.states.len())?;
        writeln!(f, "Number of goal states: {}", self.goal_states.len())?;
        write!(f, "Number of transitions: {}", self.transitions.len())
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f, "Start state: {}", self.start)?;
        writeln!(f, "Goal states: {:?}", self.goal_states)?;

        for Transition {
            source,
            label,
            destination,
        } in &self.transitions
        {
            writeln!(f, "{source} --[{label}]-> {destination}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn epsilon_cycle() -> Automaton {
        Automaton::new(
            0,
            [3],
            [
                Transition::epsilon(0, 1),
                Transition::epsilon(1, 2),
                Transition::epsilon(2, 0),
                Transition::new(2, 'a', 3),
                Transition::epsilon(3, 4),
            ],
        )
    }

    #[test]
    fn test_derived_states() {
        let automaton = Automaton::new(7, [9], [Transition::new(1, 'x', 2)]);
        let states: Vec<StateId> = automaton.states().iter().copied().collect();
        assert_eq!(states, vec![1, 2, 7, 9]);
    }

    #[test]
    fn test_transition_equality() {
        assert_eq!(Transition::new(0, 'a', 1), Transition::new(0, Label::Symbol('a'), 1));
        assert_ne!(Transition::new(0, 'a', 1), Transition::new(0, 'a', 2));
        assert_ne!(Transition::new(0, 'a', 1), Transition::epsilon(0, 1));
    }

    #[test]
    fn test_alphabet_contains_epsilon_first() {
        let alphabet: Vec<Label> = epsilon_cycle().alphabet().into_iter().collect();
        assert_eq!(alphabet, vec![EPSILON, Label::Symbol('a')]);
    }

    #[test]
    fn test_epsilon_closure_with_cycle() {
        let automaton = epsilon_cycle();

        let closure: Vec<StateId> = automaton.epsilon_closure(1).into_iter().collect();
        assert_eq!(closure, vec![0, 1, 2]);

        let closure: Vec<StateId> = automaton.epsilon_closure(3).into_iter().collect();
        assert_eq!(closure, vec![3, 4]);

        let closure: Vec<StateId> = automaton.epsilon_closure(4).into_iter().collect();
        assert_eq!(closure, vec![4]);
    }

    #[test]
    fn test_epsilon_closure_with_huge_identifiers() {
        let far = 1usize << 40;
        let automaton = Automaton::new(
            far,
            [usize::MAX - 1],
            [
                Transition::epsilon(far, usize::MAX - 1),
                Transition::epsilon(usize::MAX - 1, far),
            ],
        );

        assert_eq!(automaton.epsilon_closure(far), BTreeSet::from([far, usize::MAX - 1]));
    }

    #[test]
    fn test_step() {
        let automaton = epsilon_cycle();
        let from = BTreeSet::from([1, 2]);

        assert_eq!(automaton.step(&from, Label::Symbol('a')), BTreeSet::from([3]));
        assert_eq!(automaton.step(&from, EPSILON), BTreeSet::from([0, 2]));
        assert!(automaton.step(&from, Label::Symbol('b')).is_empty());
    }

    #[test]
    fn test_check_deterministic() {
        let dfa = Automaton::new(
            0,
            [1],
            [
                Transition::new(0, 'a', 1),
                Transition::new(0, 'b', 0),
                Transition::new(0, 'a', 1),
            ],
        );
        assert_eq!(dfa.check_deterministic(), Ok(()));

        let ambiguous = Automaton::new(0, [1], [Transition::new(0, 'a', 1), Transition::new(0, 'a', 2)]);
        assert_eq!(
            ambiguous.check_deterministic(),
            Err(AutomatonError::DuplicateTransition {
                state: 0,
                symbol: 'a',
                first: 1,
                second: 2
            })
        );

        assert_eq!(
            epsilon_cycle().check_deterministic(),
            Err(AutomatonError::EpsilonTransition {
                state: 0,
                destination: 1
            })
        );
    }

    #[test]
    fn test_debug_lists_transitions() {
        let output = format!("{:?}", epsilon_cycle());
        assert!(output.contains("2 --[a]-> 3"));
        assert!(output.contains("0 --[ε]-> 1"));
        assert!(output.contains("Number of transitions: 5"));
    }
}
