//! Subset construction algorithm for converting ε-NFA to DFA.

use crate::automaton::dfa::Dfa;
use crate::automaton::epsilon_nfa::EpsilonNfa;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use std::collections::VecDeque;

/// Subset states keyed by their sorted NFA state ids, before relabeling.
///
/// Rows are stored in discovery order. A symbol whose move is empty has no
/// entry in its row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowersetTable {
    pub rows: IndexMap<Vec<StateId>, IndexMap<Symbol, Vec<StateId>>>,
    pub accepting: IndexSet<Vec<StateId>>,
}

impl PowersetTable {
    /// Register a subset state if unseen. Returns `true` for a new key.
    fn discover(&mut self, key: &[StateId], accepting: bool) -> bool {
        if self.rows.contains_key(key) {
            return false;
        }
        self.rows.insert(key.to_vec(), IndexMap::new());
        if accepting {
            self.accepting.insert(key.to_vec());
        }
        true
    }
}

/// Breadth-first powerset construction over epsilon closures.
pub fn powerset_table(nfa: &EpsilonNfa) -> PowersetTable {
    let closures = nfa.epsilon_closures();
    let alphabet = nfa.alphabet();
    let accept = nfa.accept_state();

    let closure_of = |states: &StateSet| {
        let mut closure = StateSet::with_capacity(nfa.num_states());
        for state in states.iter() {
            closure.union_with(&closures[state as usize]);
        }
        closure
    };

    let mut table = PowersetTable::default();
    let mut worklist: VecDeque<StateSet> = VecDeque::new();

    let initial = closures[nfa.start_state() as usize].clone();
    table.discover(&initial.to_vec(), initial.contains(accept));
    worklist.push_back(initial);

    while let Some(current) = worklist.pop_front() {
        let current_key = current.to_vec();
        trace!("expanding subset {current:?}");

        for &symbol in &alphabet {
            let moved = nfa.move_on_symbol(&current, symbol);
            if moved.is_empty() {
                continue;
            }

            let next = closure_of(&moved);
            let next_key = next.to_vec();
            if table.discover(&next_key, next.contains(accept)) {
                worklist.push_back(next);
            }

            if let Some(row) = table.rows.get_mut(&current_key) {
                row.insert(symbol, next_key);
            }
        }
    }

    table
}

/// Number subset states in first-seen order: rows are scanned in order, the
/// row key first and then each destination. Accepting keys reuse the same
/// numbering. The first row's key becomes the start state.
pub fn relabel(table: &PowersetTable) -> Dfa {
    let mut dfa = Dfa::new();
    let mut ids: IndexMap<&[StateId], StateId> = IndexMap::new();

    fn id_of<'a>(
        ids: &mut IndexMap<&'a [StateId], StateId>,
        dfa: &mut Dfa,
        key: &'a [StateId],
    ) -> StateId {
        *ids.entry(key).or_insert_with(|| dfa.add_state())
    }

    for (key, row) in &table.rows {
        let source = id_of(&mut ids, &mut dfa, key);
        for (&symbol, destination) in row {
            let destination = id_of(&mut ids, &mut dfa, destination);
            dfa.add_transition(source, symbol, destination);
        }
    }

    for key in &table.accepting {
        let state = id_of(&mut ids, &mut dfa, key);
        dfa.add_final_state(state);
    }

    if let Some(start) = table.rows.keys().next().and_then(|key| ids.get(key.as_slice())) {
        dfa.set_start_state(*start);
    }

    dfa
}

/// Convert an epsilon-NFA to a DFA using the powerset construction algorithm.
pub fn subset_construction(nfa: &EpsilonNfa) -> Dfa {
    let table = powerset_table(nfa);
    let dfa = relabel(&table);
    debug!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );
    dfa
}
