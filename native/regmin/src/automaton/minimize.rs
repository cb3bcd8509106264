//! DFA minimization by table filling.
//!
//! The transition function is first made total with one dead state that
//! absorbs every undefined move. Pairs with different acceptance are marked
//! distinguishable, and marks are pushed backwards along reverse transitions
//! until nothing changes. Reachable states that were never told apart are
//! merged; unreachable states, the dead state included, are dropped.

use crate::automaton::dfa::Dfa;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use fixedbitset::FixedBitSet;
use log::debug;
use std::collections::{HashMap, VecDeque};

/// Symmetric "distinguishable" relation over `size` states.
struct PairTable {
    size: usize,
    bits: FixedBitSet,
}

impl PairTable {
    fn new(size: usize) -> Self {
        Self {
            size,
            bits: FixedBitSet::with_capacity(size * size),
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        lo * self.size + hi
    }

    /// Mark a pair. Returns `true` if it was unmarked before.
    fn mark(&mut self, i: usize, j: usize) -> bool {
        let idx = self.index(i, j);
        !self.bits.put(idx)
    }

    fn is_marked(&self, i: usize, j: usize) -> bool {
        self.bits.contains(self.index(i, j))
    }
}

/// The input DFA with a dead state appended and every move defined.
struct TotalDfa {
    /// delta[state][symbol index]
    delta: Vec<Vec<usize>>,
    /// reverse[destination][symbol index] = sources
    reverse: Vec<Vec<Vec<usize>>>,
    accepting: Vec<bool>,
}

impl TotalDfa {
    fn new(dfa: &Dfa, states: &[StateId], index: &HashMap<StateId, usize>, alphabet: &[Symbol]) -> Self {
        let dead = states.len();
        let size = states.len() + 1;

        let mut delta = vec![vec![dead; alphabet.len()]; size];
        for (i, &state) in states.iter().enumerate() {
            for (k, &symbol) in alphabet.iter().enumerate() {
                if let Some(next) = dfa.transition(state, symbol) {
                    delta[i][k] = index[&next];
                }
            }
        }

        let mut reverse = vec![vec![Vec::new(); alphabet.len()]; size];
        for (source, row) in delta.iter().enumerate() {
            for (k, &destination) in row.iter().enumerate() {
                reverse[destination][k].push(source);
            }
        }

        let mut accepting: Vec<bool> = states.iter().map(|&s| dfa.is_final(s)).collect();
        accepting.push(false);

        Self {
            delta,
            reverse,
            accepting,
        }
    }

    fn size(&self) -> usize {
        self.delta.len()
    }

    /// Fill the distinguishability table to its fixpoint.
    fn distinguishable_pairs(&self) -> PairTable {
        let size = self.size();
        let mut table = PairTable::new(size);
        let mut worklist = VecDeque::new();

        for i in 0..size {
            for j in (i + 1)..size {
                if self.accepting[i] != self.accepting[j] {
                    table.mark(i, j);
                    worklist.push_back((i, j));
                }
            }
        }

        while let Some((u, v)) = worklist.pop_front() {
            for (from_u, from_v) in self.reverse[u].iter().zip(&self.reverse[v]) {
                for &r in from_u {
                    for &s in from_v {
                        if r != s && table.mark(r, s) {
                            worklist.push_back((r, s));
                        }
                    }
                }
            }
        }

        table
    }
}

/// Produce the minimal DFA accepting the same language as `dfa`.
///
/// The result is numbered from 0 (the start state's class) in breadth-first
/// order and contains only states reachable from the start. Callers must not
/// rely on any relation between input and output state ids.
pub fn minimize(dfa: &Dfa) -> Dfa {
    let Some(start) = dfa.start_state() else {
        return Dfa::new();
    };

    let states: Vec<StateId> = dfa.states().collect();
    let index: HashMap<StateId, usize> = states.iter().enumerate().map(|(i, &s)| (s, i)).collect();
    let alphabet: Vec<Symbol> = dfa.alphabet().into_iter().collect();

    let total = TotalDfa::new(dfa, &states, &index, &alphabet);
    let distinguishable = total.distinguishable_pairs();

    // Class ids follow breadth-first order, so the start state's class is 0.
    let reachable = dfa.reachable_states();
    debug_assert_eq!(reachable.first(), Some(&start));

    let mut representatives: Vec<usize> = Vec::new();
    let mut class_of: HashMap<StateId, StateId> = HashMap::with_capacity(reachable.len());
    for &state in &reachable {
        let i = index[&state];
        let class = match representatives
            .iter()
            .position(|&r| !distinguishable.is_marked(r, i))
        {
            Some(class) => class,
            None => {
                representatives.push(i);
                representatives.len() - 1
            }
        };
        class_of.insert(state, class as StateId);
    }

    let mut minimized = Dfa::new();
    for _ in 0..representatives.len() {
        minimized.add_state();
    }
    minimized.set_start_state(class_of[&start]);

    for &state in &reachable {
        let source = class_of[&state];
        for (symbol, next) in dfa.transitions_from(state) {
            minimized.add_transition(source, symbol, class_of[&next]);
        }
        if dfa.is_final(state) {
            minimized.add_final_state(source);
        }
    }

    debug!(
        "minimized DFA: {} states -> {} states",
        dfa.num_states(),
        minimized.num_states()
    );
    minimized
}
