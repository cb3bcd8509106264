//! Compiler configuration.

use crate::automaton::Alphabet;

/// Options for turning a pattern into an automaton.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Literal symbols accepted in patterns.
    pub alphabet: Alphabet,
    /// Run the minimizer after subset construction.
    pub minimize: bool,
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::lowercase(),
            minimize: true,
        }
    }
}
