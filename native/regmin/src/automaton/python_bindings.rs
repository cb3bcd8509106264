//! PyO3 bindings for the automaton module.

use crate::automaton::{
    Automaton, Dfa, EpsilonNfa, StateId, build_nfa, subset_construction, to_postfix,
};
use crate::config::CompilerConfig;
use crate::error::RegexError;
use crate::regex::Regex;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PySet};

impl From<RegexError> for PyErr {
    fn from(err: RegexError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// An epsilon-NFA built from a pattern.
#[pyclass(name = "EpsilonNFA", module = "regmin.automaton", frozen)]
pub struct PyEpsilonNFA {
    nfa: EpsilonNfa,
}

#[pymethods]
impl PyEpsilonNFA {
    #[getter]
    fn start_state(&self) -> StateId {
        self.nfa.start_state()
    }

    #[getter]
    fn accept_state(&self) -> StateId {
        self.nfa.accept_state()
    }

    fn __len__(&self) -> usize {
        self.nfa.num_states()
    }

    /// Whether the NFA accepts the whole string.
    fn test(&self, string: &str) -> bool {
        self.nfa.accepts(string)
    }

    /// Convert to a DFA via subset construction (not minimized).
    fn to_dfa(&self) -> PyDFA {
        PyDFA {
            dfa: subset_construction(&self.nfa),
        }
    }
}

/// A Deterministic Finite Automaton.
#[pyclass(name = "DeterministicFiniteAutomaton", module = "regmin.automaton", frozen)]
pub struct PyDFA {
    dfa: Dfa,
}

#[pymethods]
impl PyDFA {
    /// Get the start state as an integer index.
    #[getter]
    fn start_state(&self) -> Option<StateId> {
        self.dfa.start_state()
    }

    /// Get the final states as a set of integer indices.
    #[getter]
    fn final_states(&self, py: Python<'_>) -> PyResult<Py<PySet>> {
        let set = PySet::empty(py)?;
        for state in self.dfa.final_states().iter() {
            set.add(state)?;
        }
        Ok(set.unbind())
    }

    /// The transition table as `{state: {symbol: state}}`. Every state is a key.
    #[getter]
    fn transitions(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let table = PyDict::new(py);
        for state in self.dfa.states() {
            let row = PyDict::new(py);
            for (symbol, next) in self.dfa.transitions_from(state) {
                row.set_item(symbol, next)?;
            }
            table.set_item(state, row)?;
        }
        Ok(table.unbind())
    }

    fn __len__(&self) -> usize {
        self.dfa.num_states()
    }

    /// Whether the DFA accepts the whole string.
    fn test(&self, string: &str) -> bool {
        self.dfa.accepts(string)
    }

    /// Check if the DFA's language is empty.
    fn is_empty(&self) -> bool {
        self.dfa.is_empty()
    }

    /// Minimize the DFA (returns a new minimized DFA).
    fn minimize(&self) -> PyDFA {
        PyDFA {
            dfa: self.dfa.minimize(),
        }
    }
}

/// Compile a pattern into a DFA.
#[pyfunction]
#[pyo3(signature = (pattern, minimize = true))]
fn compile(pattern: &str, minimize: bool) -> PyResult<PyDFA> {
    let config = CompilerConfig::new().with_minimize(minimize);
    let regex = Regex::with_config(pattern, &config)?;
    Ok(PyDFA {
        dfa: regex.into_dfa(),
    })
}

/// Build the epsilon-NFA of a pattern.
#[pyfunction]
fn compile_nfa(pattern: &str) -> PyResult<PyEpsilonNFA> {
    let nfa = build_nfa(&to_postfix(pattern)?)?;
    Ok(PyEpsilonNFA { nfa })
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEpsilonNFA>()?;
    m.add_class::<PyDFA>()?;
    m.add_function(wrap_pyfunction!(compile, m)?)?;
    m.add_function(wrap_pyfunction!(compile_nfa, m)?)?;
    Ok(())
}
