//! Finite automata for regular expressions.
//!
//! This module provides:
//! - Infix to postfix translation of patterns
//! - Thompson construction of epsilon-NFAs
//! - Subset construction (NFA to DFA conversion)
//! - Table-filling DFA minimization
//! - PyO3 bindings for Python interoperability (feature `python`)

mod dfa;
mod epsilon_nfa;
mod minimize;
mod postfix;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;
mod thompson;

pub use dfa::{Dfa, GraphEdge};
pub use epsilon_nfa::{EpsilonNfa, NfaState};
pub use minimize::minimize;
pub use postfix::{Postfix, Token, to_postfix, to_postfix_with};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use state::{StateId, StateSet};
pub use subset_construction::{PowersetTable, powerset_table, relabel, subset_construction};
pub use symbol::{Alphabet, EPSILON, Symbol, is_epsilon};
pub use thompson::{Fragment, ThompsonBuilder, build_nfa};

/// Membership testing shared by NFAs and DFAs.
pub trait Automaton {
    /// Whether the automaton accepts the whole of `input`.
    fn accepts(&self, input: &str) -> bool;
}
