use std::env;

use epsilon_dfa::translate_to_dfa;
use epsilon_dfa::Automaton;
use epsilon_dfa::DfaMatcher;
use epsilon_dfa::Matcher;
use epsilon_dfa::NfaMatcher;
use epsilon_dfa::Transition;

// ab*|b*c|a*c*
fn regex_nfa() -> Automaton {
    Automaton::with_states(
        0..7,
        0,
        [1, 2, 4, 5, 6],
        [
            Transition::epsilon(0, 1),
            Transition::epsilon(0, 3),
            Transition::epsilon(0, 5),
            Transition::new(1, 'a', 2),
            Transition::new(2, 'b', 2),
            Transition::new(3, 'b', 3),
            Transition::new(3, 'c', 4),
            Transition::new(5, 'a', 5),
            Transition::new(5, 'c', 6),
            Transition::new(6, 'c', 6),
        ],
    )
}

fn regex_dfa() -> Automaton {
    Automaton::with_states(
        0..10,
        0,
        [0, 1, 3, 4, 5, 6, 7, 8, 9],
        [
            Transition::new(0, 'a', 1),
            Transition::new(0, 'b', 2),
            Transition::new(0, 'c', 3),
            Transition::new(1, 'a', 4),
            Transition::new(1, 'b', 5),
            Transition::new(1, 'c', 6),
            Transition::new(2, 'b', 2),
            Transition::new(2, 'c', 7),
            Transition::new(3, 'c', 8),
            Transition::new(4, 'a', 4),
            Transition::new(4, 'c', 9),
            Transition::new(5, 'b', 5),
            Transition::new(6, 'c', 6),
            Transition::new(8, 'c', 8),
            Transition::new(9, 'c', 9),
        ],
    )
}

fn main() {
    env_logger::init();

    let mut inputs: Vec<String> = env::args().skip(1).collect();
    if inputs.is_empty() {
        inputs = ["ab", "c", "bbc", "aabbcc", ""].iter().map(|s| s.to_string()).collect();
    }

    let nfa = NfaMatcher::new(regex_nfa());
    let dfa = DfaMatcher::new(&regex_dfa());
    let translated = translate_to_dfa(nfa.automaton());
    println!("translation\n{translated:?}");

    let translated = DfaMatcher::new(&translated);
    let held = DfaMatcher::new(&nfa.translate_to_dfa());

    for input in &inputs {
        println!("{input:?}");
        println!("  nfa-epsilon: {}", nfa.matches(input));
        println!("  dfa: {}", dfa.matches(input));
        println!("  translated dfa: {}", translated.matches(input));
        println!("  held translation dfa: {}", held.matches(input));
    }
}
