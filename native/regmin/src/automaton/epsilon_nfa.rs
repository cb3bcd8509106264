//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::automaton::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol, is_epsilon};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// A state of an epsilon-NFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    accepting: bool,
    /// symbol -> destinations, in insertion order. Duplicates are allowed.
    transitions: IndexMap<Symbol, Vec<StateId>>,
}

impl NfaState {
    pub(crate) fn new(accepting: bool) -> Self {
        Self {
            accepting,
            transitions: IndexMap::new(),
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub(crate) fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    pub(crate) fn push_transition(&mut self, symbol: Symbol, destination: StateId) {
        self.transitions.entry(symbol).or_default().push(destination);
    }

    /// Destinations on `symbol`; empty when there are none.
    pub fn targets(&self, symbol: Symbol) -> &[StateId] {
        self.transitions.get(&symbol).map_or(&[], Vec::as_slice)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, &[StateId])> + '_ {
        self.transitions
            .iter()
            .map(|(&symbol, dests)| (symbol, dests.as_slice()))
    }

    /// Every destination, across all symbols, in insertion order.
    pub fn neighbors(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions.values().flatten().copied()
    }

    pub(crate) fn renumbered(&self, renumber: impl Fn(StateId) -> StateId) -> Self {
        Self {
            accepting: self.accepting,
            transitions: self
                .transitions
                .iter()
                .map(|(&symbol, dests)| (symbol, dests.iter().map(|&d| renumber(d)).collect()))
                .collect(),
        }
    }
}

/// An epsilon-NFA with a single start state and a single accepting state,
/// as produced by the Thompson builder. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpsilonNfa {
    states: Vec<NfaState>,
    start_state: StateId,
    accept_state: StateId,
}

impl EpsilonNfa {
    pub(crate) fn from_states(
        states: Vec<NfaState>,
        start_state: StateId,
        accept_state: StateId,
    ) -> Self {
        debug_assert!((start_state as usize) < states.len());
        debug_assert!((accept_state as usize) < states.len());
        Self {
            states,
            start_state,
            accept_state,
        }
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// The exit state of the final fragment.
    pub fn accept_state(&self) -> StateId {
        self.accept_state
    }

    pub fn state(&self, state: StateId) -> &NfaState {
        &self.states[state as usize]
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &NfaState)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(id, state)| (id as StateId, state))
    }

    /// Destinations of `state` on `symbol`.
    pub fn transitions(&self, state: StateId, symbol: Symbol) -> &[StateId] {
        self.state(state).targets(symbol)
    }

    /// All symbols used, excluding epsilon.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.states
            .iter()
            .flat_map(|state| state.transitions.keys().copied())
            .filter(|&symbol| !is_epsilon(symbol))
            .collect()
    }

    /// The states reachable from `states` through epsilon transitions alone,
    /// including `states` themselves.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.states.len());
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            stack.extend(
                self.transitions(s, EPSILON)
                    .iter()
                    .filter(|&&dest| !closure.contains(dest)),
            );
        }

        closure
    }

    /// Epsilon closure of every state, indexed by state id.
    pub fn epsilon_closures(&self) -> Vec<StateSet> {
        (0..self.states.len() as StateId)
            .map(|s| self.epsilon_closure(&StateSet::singleton(s, self.states.len())))
            .collect()
    }

    /// States reached from `states` on one `symbol`, before any epsilon moves.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        assert!(!is_epsilon(symbol), "Use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.states.len());
        for state in states.iter() {
            reached.extend(self.transitions(state, symbol).iter().copied());
        }
        reached
    }

    /// The full transition table: each state's symbol transitions, with the
    /// epsilon entry replaced by the state's complete epsilon closure.
    pub fn transition_table(&self) -> IndexMap<StateId, IndexMap<Symbol, Vec<StateId>>> {
        let closures = self.epsilon_closures();
        self.states()
            .map(|(id, state)| {
                let mut row: IndexMap<Symbol, Vec<StateId>> = state
                    .transitions()
                    .filter(|&(symbol, _)| !is_epsilon(symbol))
                    .map(|(symbol, dests)| (symbol, dests.to_vec()))
                    .collect();
                row.insert(EPSILON, closures[id as usize].to_vec());
                (id, row)
            })
            .collect()
    }

    /// Check if the NFA accepts no string at all.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.states.len());
        let mut queue = VecDeque::from([self.start_state]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }
            if self.state(state).is_accepting() {
                return false;
            }
            queue.extend(self.state(state).neighbors().filter(|&n| !visited.contains(n)));
        }

        true
    }
}

impl Automaton for EpsilonNfa {
    /// Explores every path with an explicit stack. A configuration is a state
    /// and an input position; each configuration is expanded at most once,
    /// which keeps epsilon cycles from looping.
    fn accepts(&self, input: &str) -> bool {
        let symbols: Vec<Symbol> = input.chars().collect();
        let mut seen: HashSet<(StateId, usize)> = HashSet::new();
        let mut stack = vec![(self.start_state, 0usize)];

        while let Some((state, position)) = stack.pop() {
            if !seen.insert((state, position)) {
                continue;
            }
            let current = self.state(state);

            if position == symbols.len() && current.is_accepting() {
                return true;
            }
            if let Some(&symbol) = symbols.get(position) {
                if !is_epsilon(symbol) {
                    stack.extend(current.targets(symbol).iter().map(|&d| (d, position + 1)));
                }
            }
            stack.extend(current.targets(EPSILON).iter().map(|&d| (d, position)));
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::thompson::ThompsonBuilder;

    fn union_ab() -> EpsilonNfa {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a');
        let b = builder.literal('b');
        let either = builder.union(a, b);
        builder.finish(either)
    }

    #[test]
    fn test_epsilon_closure() {
        let nfa = union_ab();

        let closure = nfa.epsilon_closure(&StateSet::singleton(0, nfa.num_states()));
        assert_eq!(closure.to_vec(), vec![0, 1, 4]);

        let closure = nfa.epsilon_closure(&StateSet::singleton(2, nfa.num_states()));
        assert_eq!(closure.to_vec(), vec![2, 3]);
    }

    #[test]
    fn test_move_on_symbol() {
        let nfa = union_ab();
        let start = nfa.epsilon_closure(&StateSet::singleton(0, nfa.num_states()));

        assert_eq!(nfa.move_on_symbol(&start, 'a').to_vec(), vec![2]);
        assert_eq!(nfa.move_on_symbol(&start, 'b').to_vec(), vec![5]);
        assert!(nfa.move_on_symbol(&start, 'c').is_empty());
    }

    #[test]
    fn test_full_transition_table() {
        let table = union_ab().transition_table();

        let expected: IndexMap<StateId, IndexMap<Symbol, Vec<StateId>>> = [
            (0, IndexMap::from([(EPSILON, vec![0, 1, 4])])),
            (1, IndexMap::from([('a', vec![2]), (EPSILON, vec![1])])),
            (2, IndexMap::from([(EPSILON, vec![2, 3])])),
            (3, IndexMap::from([(EPSILON, vec![3])])),
            (4, IndexMap::from([('b', vec![5]), (EPSILON, vec![4])])),
            (5, IndexMap::from([(EPSILON, vec![3, 5])])),
        ]
        .into_iter()
        .collect();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_alphabet_excludes_epsilon() {
        let nfa = union_ab();
        assert_eq!(nfa.alphabet(), BTreeSet::from(['a', 'b']));
    }

    #[test]
    fn test_accepts_with_epsilon_cycles() {
        // (a*)* nests two epsilon loops around the same literal.
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a');
        let inner = builder.star(a);
        let outer = builder.star(inner);
        let nfa = builder.finish(outer);

        assert!(nfa.accepts(""));
        assert!(nfa.accepts("a"));
        assert!(nfa.accepts("aaaa"));
        assert!(!nfa.accepts("b"));
        assert!(!nfa.accepts("ab"));
    }

    #[test]
    fn test_accepts_optional() {
        let mut builder = ThompsonBuilder::new();
        let a = builder.literal('a');
        let maybe = builder.optional(a);
        let nfa = builder.finish(maybe);

        assert!(nfa.accepts(""));
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts("aa"));
    }

    #[test]
    fn test_epsilon_in_input_is_not_a_symbol() {
        let mut builder = ThompsonBuilder::new();
        let empty = builder.epsilon();
        let nfa = builder.finish(empty);

        assert!(nfa.accepts(""));
        assert!(!nfa.accepts("ε"));
    }

    #[test]
    fn test_is_empty() {
        assert!(!union_ab().is_empty());
    }
}
