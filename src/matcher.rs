use std::fmt::Debug;

use log::trace;

/// The step protocol shared by the DFA and NFA-ε matchers.
///
/// A matcher walks a `State` through the input one symbol at a time. Running
/// out of transitions is not an error, `next_state` returns `None` and the
/// input is rejected.
pub trait Matcher {
    type State: Debug;

    fn start_state(&self) -> Self::State;

    /// Returns the state reached from `state` on `symbol`, or `None` when the
    /// matcher is stuck.
    fn next_state(&self, state: &Self::State, symbol: char) -> Option<Self::State>;

    fn is_accepting(&self, state: &Self::State) -> bool;

    /// Returns true iff the whole input is accepted.
    ///
    /// The empty input is never accepted, not even when the start state is
    /// accepting: acceptance is decided on the state reached by the last
    /// consumed symbol.
    fn matches(&self, input: &str) -> bool {
        if input.is_empty() {
            return false;
        }

        let mut state = self.start_state();
        for (offset, symbol) in input.chars().enumerate() {
            match self.next_state(&state, symbol) {
                Some(next) => {
                    trace!("{offset}: {state:?} --[{symbol}]-> {next:?}");
                    state = next;
                }
                None => {
                    trace!("{offset}: stuck in {state:?} on '{symbol}'");
                    return false;
                }
            }
        }

        self.is_accepting(&state)
    }
}
