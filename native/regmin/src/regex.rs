//! Pattern compilation pipeline.

use crate::automaton::{
    Automaton, Dfa, EpsilonNfa, Postfix, build_nfa, subset_construction, to_postfix_with,
};
use crate::config::CompilerConfig;
use crate::error::Result;
use log::debug;

/// A compiled pattern: its postfix form, its NFA and its (by default
/// minimal) DFA.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    postfix: Postfix,
    nfa: EpsilonNfa,
    dfa: Dfa,
}

impl Regex {
    /// Compile with the default configuration.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_config(pattern, &CompilerConfig::default())
    }

    pub fn with_config(pattern: &str, config: &CompilerConfig) -> Result<Self> {
        let postfix = to_postfix_with(pattern, &config.alphabet)?;
        let nfa = build_nfa(&postfix)?;
        let dfa = subset_construction(&nfa);
        let dfa = if config.minimize { dfa.minimize() } else { dfa };

        debug!(
            "compiled {pattern:?}: {} NFA states, {} DFA states",
            nfa.num_states(),
            dfa.num_states()
        );
        Ok(Self {
            pattern: pattern.to_string(),
            postfix,
            nfa,
            dfa,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn postfix(&self) -> &Postfix {
        &self.postfix
    }

    pub fn nfa(&self) -> &EpsilonNfa {
        &self.nfa
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    /// Whether the whole of `input` matches the pattern.
    pub fn is_match(&self, input: &str) -> bool {
        self.dfa.accepts(input)
    }
}
