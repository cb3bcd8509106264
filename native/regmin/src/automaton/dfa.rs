//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::Automaton;
use crate::automaton::minimize;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::{BTreeSet, VecDeque};

/// A labeled edge in the graph representation: (source, destination, label).
pub type GraphEdge = (StateId, StateId, Symbol);

/// A Deterministic Finite Automaton with a possibly partial transition
/// function: a missing transition rejects.
///
/// Every state id that appears as a source or destination is also a key of
/// the transition table, so collaborators can enumerate [`states`](Self::states)
/// and look up each one. A DFA is read-only once built; [`minimize`](Self::minimize)
/// returns a new automaton whose state ids are unrelated to the input's, and
/// which drops states unreachable from the start state.
#[derive(Debug, Clone, Default)]
pub struct Dfa {
    /// Start state (None if empty)
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// source -> symbol -> destination, in insertion order
    transitions: IndexMap<StateId, IndexMap<Symbol, StateId>>,
    /// Smallest id never handed out
    next_state: StateId,
}

impl Dfa {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_state(&mut self, state: StateId) {
        self.transitions.entry(state).or_default();
        self.next_state = self.next_state.max(state + 1);
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.next_state;
        self.ensure_state(id);
        id
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.final_states.insert(state);
    }

    /// Add or replace the transition from `source` on `symbol`.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);
        self.transitions[&source].insert(symbol, destination);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&source)?.get(&symbol).copied()
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// All states, in the order they were added.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions.keys().copied()
    }

    /// Outgoing edges of `state` as (symbol, destination).
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.transitions
            .get(&state)
            .into_iter()
            .flat_map(|row| row.iter().map(|(&symbol, &dst)| (symbol, dst)))
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions.iter().flat_map(|(&src, row)| {
            row.iter().map(move |(&symbol, &dst)| (src, symbol, dst))
        })
    }

    /// Every symbol labelling some transition.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.transitions
            .values()
            .flat_map(|row| row.keys().copied())
            .collect()
    }

    /// States reachable from the start state, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<StateId> {
        let Some(start) = self.start_state else {
            return Vec::new();
        };

        let mut seen = StateSet::with_capacity(self.next_state as usize);
        let mut order = Vec::with_capacity(self.transitions.len());
        let mut queue = VecDeque::from([start]);
        seen.insert(start);

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for (_, next) in self.transitions_from(state) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        !self
            .reachable_states()
            .into_iter()
            .any(|state| self.is_final(state))
    }

    /// Minimize the DFA. Returns a new minimized DFA.
    pub fn minimize(&self) -> Dfa {
        minimize::minimize(self)
    }

    /// Convert to a graph representation: (nodes, edges) where edges are
    /// (src, dst, label).
    pub fn to_graph(&self) -> (Vec<StateId>, Vec<GraphEdge>) {
        let nodes = self.states().collect();
        let edges = self
            .transitions()
            .map(|(src, symbol, dst)| (src, dst, symbol))
            .collect();
        (nodes, edges)
    }
}

impl PartialEq for Dfa {
    /// Structural equality: same ids, same edges, same start and final states.
    fn eq(&self, other: &Self) -> bool {
        self.start_state == other.start_state
            && self.final_states == other.final_states
            && self.transitions == other.transitions
    }
}

impl Eq for Dfa {}

impl Automaton for Dfa {
    fn accepts(&self, input: &str) -> bool {
        let Some(mut state) = self.start_state else {
            return false;
        };
        for symbol in input.chars() {
            match self.transition(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_final(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dfa_basic() {
        let mut dfa = Dfa::new();
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        let s2 = dfa.add_state();

        dfa.set_start_state(s0);
        dfa.add_final_state(s2);
        dfa.add_transition(s0, 'a', s1);
        dfa.add_transition(s1, 'b', s2);

        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.start_state(), Some(0));
        assert!(!dfa.is_empty());
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("abb"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn test_transitions_register_destinations() {
        let mut dfa = Dfa::new();
        dfa.add_transition(0, 'a', 7);

        assert_eq!(dfa.states().collect::<Vec<_>>(), vec![0, 7]);
        assert_eq!(dfa.transitions_from(7).count(), 0);
        assert_eq!(dfa.add_state(), 8);
    }

    #[test]
    fn test_reachable_states_in_bfs_order() {
        let mut dfa = Dfa::new();
        dfa.set_start_state(0);
        dfa.add_transition(0, 'a', 2);
        dfa.add_transition(0, 'b', 1);
        dfa.add_transition(2, 'a', 3);
        dfa.add_transition(4, 'a', 0);

        assert_eq!(dfa.reachable_states(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_empty_dfa() {
        let dfa = Dfa::new();
        assert!(dfa.is_empty());
        assert!(!dfa.accepts(""));

        let mut dfa2 = Dfa::new();
        dfa2.add_state();
        dfa2.set_start_state(0);
        // No final states - should be empty
        assert!(dfa2.is_empty());

        // A final state that cannot be reached does not count.
        dfa2.add_final_state(1);
        assert!(dfa2.is_empty());
    }

    #[test]
    fn test_alphabet_and_graph() {
        let mut dfa = Dfa::new();
        dfa.set_start_state(0);
        dfa.add_transition(0, 'b', 1);
        dfa.add_transition(1, 'a', 0);

        assert_eq!(dfa.alphabet(), BTreeSet::from(['a', 'b']));

        let (nodes, edges) = dfa.to_graph();
        assert_eq!(nodes, vec![0, 1]);
        assert_eq!(edges, vec![(0, 1, 'b'), (1, 0, 'a')]);
    }
}
