//! Regular expressions compiled to minimal deterministic finite automata.
//!
//! A pattern goes through four stages, each a pure transformation:
//! infix to postfix translation, Thompson construction of an epsilon-NFA,
//! subset construction of a DFA, and table-filling minimization.
//!
//! ```
//! use regmin::Regex;
//!
//! let regex = Regex::new("(a|b)*abb").unwrap();
//! assert!(regex.is_match("babb"));
//! assert!(!regex.is_match("ab"));
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod regex;

pub use automaton::Automaton;
pub use config::CompilerConfig;
pub use error::{RegexError, Result};
pub use regex::Regex;

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;

    fn import_submodule<'py>(
        py: Python<'py>,
        m: &Bound<'py, PyModule>,
        package: &str,
        name: &str,
        import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
    ) -> PyResult<()> {
        let submodule = PyModule::new(py, name)?;
        import_func(&submodule)?;

        // Add the submodule to sys.modules
        let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
        sys_modules.set_item(format!("{package}.{name}"), submodule.clone())?;

        m.add_submodule(&submodule)?;
        Ok(())
    }

    #[pymodule]
    fn regmin(m: &Bound<'_, PyModule>) -> PyResult<()> {
        import_submodule(m.py(), m, "regmin", "automaton", crate::automaton::automaton)
    }
}
