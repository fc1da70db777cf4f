use rand::Rng;

use crate::automaton::Automaton;
use crate::automaton::StateId;
use crate::automaton::Transition;

/// Parameters for [random_nfa].
#[derive(Clone, Debug)]
pub struct RandomAutomatonConfig {
    pub num_of_states: usize,
    pub alphabet: Vec<char>,
    /// Exclusive upper bound on the number of outgoing transitions per state.
    pub max_outdegree: usize,
    pub epsilon_probability: f64,
    pub goal_probability: f64,
}

impl Default for RandomAutomatonConfig {
    fn default() -> Self {
        RandomAutomatonConfig {
            num_of_states: 6,
            alphabet: vec!['a', 'b', 'c'],
            max_outdegree: 4,
            epsilon_probability: 0.2,
            goal_probability: 0.3,
        }
    }
}

/// Generates a random NFA-ε with start state 0. Epsilon cycles and
/// unreachable states are allowed.
///
/// Degenerate configurations are clamped instead of rejected: there is always
/// at least one state, probabilities are limited to `[0, 1]` with NaN read as
/// zero, and an empty alphabet only yields epsilon transitions.
pub fn random_nfa<R: Rng>(config: &RandomAutomatonConfig, rng: &mut R) -> Automaton {
    let num_of_states = config.num_of_states.max(1);
    let epsilon_probability = if config.alphabet.is_empty() {
        1.0
    } else {
        probability(config.epsilon_probability)
    };
    let goal_probability = probability(config.goal_probability);

    let mut goal_states = Vec::new();
    let mut transitions = Vec::new();

    for source in 0..num_of_states {
        if rng.random_bool(goal_probability) {
            goal_states.push(source);
        }

        for _ in 0..rng.random_range(0..config.max_outdegree.max(1)) {
            let destination: StateId = rng.random_range(0..num_of_states);

            let transition = if rng.random_bool(epsilon_probability) {
                Transition::epsilon(source, destination)
            } else {
                let symbol = config.alphabet[rng.random_range(0..config.alphabet.len())];
                Transition::new(source, symbol, destination)
            };

            if !transitions.contains(&transition) {
                transitions.push(transition);
            }
        }
    }

    Automaton::with_states(0..num_of_states, 0, goal_states, transitions)
}

fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Returns every non-empty string over `alphabet` up to and including
/// `max_length` symbols.
pub fn all_strings(alphabet: &[char], max_length: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = vec![String::new()];

    for _ in 0..max_length {
        let mut next = Vec::with_capacity(current.len() * alphabet.len());
        for prefix in &current {
            for &symbol in alphabet {
                let mut word = prefix.clone();
                word.push(symbol);
                next.push(word);
            }
        }

        result.extend(next.iter().cloned());
        current = next;
    }

    result
}
