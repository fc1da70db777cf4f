use std::iter;

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;

use epsilon_dfa::random_nfa;
use epsilon_dfa::translate_to_dfa;
use epsilon_dfa::Automaton;
use epsilon_dfa::DfaMatcher;
use epsilon_dfa::Matcher;
use epsilon_dfa::NfaMatcher;
use epsilon_dfa::RandomAutomatonConfig;
use epsilon_dfa::Transition;

fn haystack_same(letter: char) -> String {
    iter::repeat(letter).take(10000).collect()
}

// ab*|b*c|a*c*
fn regex_nfa() -> Automaton {
    Automaton::new(
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

pub fn criterion_benchmark_matching(c: &mut Criterion) {
    let haystack = haystack_same('a') + &haystack_same('c');

    c.bench_function("nfa matches 20000", |bencher| {
        let nfa = NfaMatcher::new(regex_nfa());
        bencher.iter(|| assert!(nfa.matches(black_box(&haystack))));
    });

    c.bench_function("dfa matches 20000", |bencher| {
        let dfa = DfaMatcher::from_nfa(&regex_nfa());
        bencher.iter(|| assert!(dfa.matches(black_box(&haystack))));
    });
}

pub fn criterion_benchmark_translation(c: &mut Criterion) {
    c.bench_function("translate regex", |bencher| {
        let nfa = regex_nfa();
        bencher.iter(|| black_box(translate_to_dfa(&nfa)));
    });

    c.bench_function("translate random 16", |bencher| {
        let config = RandomAutomatonConfig {
            num_of_states: 16,
            ..RandomAutomatonConfig::default()
        };
        let nfa = random_nfa(&config, &mut StdRng::seed_from_u64(42));
        bencher.iter(|| black_box(translate_to_dfa(&nfa)));
    });
}

criterion_group!(
    benches,
    criterion_benchmark_matching,
    criterion_benchmark_translation,
);
criterion_main!(benches);
