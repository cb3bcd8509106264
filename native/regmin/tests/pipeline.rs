use regmin::automaton::{
    Dfa, StateId, build_nfa, minimize, subset_construction, to_postfix,
};
use regmin::{Automaton, Regex};
use std::collections::BTreeSet;

const PATTERNS: &[&str] = &[
    "a",
    "ab",
    "a*",
    "a+",
    "a?",
    "a|b",
    "(a|b)*abb",
    "a+b+c",
    "a*b*c*",
    "((ab)|(ba))*(a|b)*",
    "((ab)|(ba))*",
    "a(b|c)d",
    "(a*)*",
    "(a|b?)+c",
    "a?b?a?",
    "(ab|a)*b",
];

/// Every string over `symbols` up to `max_len` characters.
fn words(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| {
                symbols.iter().map(move |&c| {
                    let mut word = prefix.clone();
                    word.push(c);
                    word
                })
            })
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

fn pattern_symbols(pattern: &str) -> BTreeSet<char> {
    pattern.chars().filter(char::is_ascii_lowercase).collect()
}

fn assert_matches(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    let regex = Regex::new(pattern).unwrap();
    for word in accepted {
        assert!(regex.is_match(word), "{pattern} should accept {word:?}");
        assert!(regex.nfa().accepts(word), "{pattern} NFA should accept {word:?}");
    }
    for word in rejected {
        assert!(!regex.is_match(word), "{pattern} should reject {word:?}");
        assert!(!regex.nfa().accepts(word), "{pattern} NFA should reject {word:?}");
    }
}

fn reachable_closure(dfa: &Dfa) -> bool {
    let reachable: BTreeSet<StateId> = dfa.reachable_states().into_iter().collect();
    dfa.states().all(|state| reachable.contains(&state))
}

#[test]
fn test_concatenation() {
    assert_matches("ab", &["ab"], &["a", "b", "", "abc"]);
}

#[test]
fn test_star() {
    assert_matches("a*", &["", "a", "aaaa"], &["b", "ab"]);
}

#[test]
fn test_plus() {
    assert_matches("a+", &["a", "aa", "aaa"], &["", "b", "bc"]);
}

#[test]
fn test_union_star_suffix() {
    assert_matches(
        "(a|b)*abb",
        &["abb", "aabb", "babb", "aaabb", "bbabb"],
        &["ab", "bbaaab"],
    );
}

#[test]
fn test_more_patterns() {
    assert_matches("a+b+c", &["aaabbc", "abc"], &["abbccc", "abca", "ab"]);
    assert_matches("a*b*c*", &["abc", "bbbcccc", "cccccccc", "aaabbc", ""], &["aaccbb"]);
    assert_matches(
        "((ab)|(ba))*(a|b)*",
        &["abbaaa", "ab", "ba", "a", ""],
        &["abc", "cab", "abac", "abacaba"],
    );
    assert_matches("a?", &["", "a"], &["aa"]);
}

#[test]
fn test_postfix_translation() {
    assert_eq!(to_postfix("(a|b)*abb").unwrap().to_string(), "ab|*a.b.b.");
    assert_eq!(to_postfix("a+b+c").unwrap().to_string(), "a+b+.c.");
}

#[test]
fn test_round_trip_language_equivalence() {
    for pattern in PATTERNS {
        let nfa = build_nfa(&to_postfix(pattern).unwrap()).unwrap();
        let dfa = subset_construction(&nfa);
        let minimal = minimize(&dfa);

        // One extra symbol outside the pattern exercises missing transitions.
        let mut symbols: Vec<char> = pattern_symbols(pattern).into_iter().collect();
        symbols.push('z');

        for word in words(&symbols, 6) {
            let expected = nfa.accepts(&word);
            assert_eq!(dfa.accepts(&word), expected, "{pattern} DFA on {word:?}");
            assert_eq!(minimal.accepts(&word), expected, "{pattern} minimal DFA on {word:?}");
        }
    }
}

#[test]
fn test_minimization_is_idempotent() {
    for pattern in PATTERNS {
        let regex = Regex::new(pattern).unwrap();
        let minimal = regex.dfa();
        let again = minimize(minimal);

        assert_eq!(again.num_states(), minimal.num_states(), "{pattern}");
        assert_eq!(again.final_states().len(), minimal.final_states().len(), "{pattern}");
        assert!(minimal.num_states() <= subset_construction(regex.nfa()).num_states());
        for word in words(&['a', 'b', 'c'], 5) {
            assert_eq!(again.accepts(&word), minimal.accepts(&word), "{pattern} on {word:?}");
        }
    }
}

#[test]
fn test_reachability_closure() {
    for pattern in PATTERNS {
        let regex = Regex::new(pattern).unwrap();
        assert!(reachable_closure(regex.dfa()), "{pattern}");
        assert!(reachable_closure(&subset_construction(regex.nfa())), "{pattern}");
    }
}

#[test]
fn test_alphabet_coverage() {
    for pattern in PATTERNS {
        let regex = Regex::new(pattern).unwrap();
        let expected = pattern_symbols(pattern);
        assert_eq!(regex.nfa().alphabet(), expected, "{pattern}");
        assert_eq!(subset_construction(regex.nfa()).alphabet(), expected, "{pattern}");
        assert_eq!(regex.dfa().alphabet(), expected, "{pattern}");
    }
}

#[test]
fn test_minimal_sizes() {
    let sizes = [("ab", 3), ("a*", 1), ("a+", 2), ("(a|b)*abb", 4), ("a|b", 2)];
    for (pattern, states) in sizes {
        assert_eq!(Regex::new(pattern).unwrap().dfa().num_states(), states, "{pattern}");
    }
}

#[test]
fn test_six_state_minimization() {
    let mut dfa = Dfa::new();
    dfa.set_start_state(0);
    for (src, symbol, dst) in [
        (0, 'a', 1),
        (0, 'b', 3),
        (1, 'a', 2),
        (1, 'b', 4),
        (2, 'a', 1),
        (2, 'b', 5),
        (3, 'a', 4),
        (3, 'b', 0),
        (4, 'a', 5),
        (4, 'b', 1),
        (5, 'a', 4),
        (5, 'b', 2),
    ] {
        dfa.add_transition(src, symbol, dst);
    }
    dfa.add_final_state(1);
    dfa.add_final_state(4);

    let minimal = minimize(&dfa);
    assert_eq!(minimal.final_states().len(), 1);
    assert_eq!(minimal.transition(0, 'a'), Some(1));
    assert_eq!(minimal.transition(1, 'b'), Some(1));

    for word in words(&['a', 'b'], 7) {
        assert_eq!(minimal.accepts(&word), dfa.accepts(&word), "{word:?}");
    }
}
