//!
//! Finite automata for string matching: a DFA matcher backed by a compiled
//! transition table, an NFA-ε matcher that simulates the automaton directly,
//! and the subset construction that turns an NFA-ε into an equivalent DFA.
//!

pub mod automaton;
pub mod dfa;
pub mod matcher;
pub mod nfa;
pub mod powerset;
pub mod random_automaton;

pub use automaton::*;
pub use dfa::DfaMatcher;
pub use matcher::Matcher;
pub use nfa::NfaMatcher;
pub use powerset::translate_to_dfa;
pub use random_automaton::*;
