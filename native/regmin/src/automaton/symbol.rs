//! Symbols for automata transitions.

use crate::error::{RegexError, Result};
use std::collections::BTreeSet;

/// A transition label. Literal symbols are single characters.
pub type Symbol = char;

/// Reserved label for empty transitions. It can never appear in a pattern
/// because no [`Alphabet`] may contain it.
pub const EPSILON: Symbol = 'ε';

pub const UNION: char = '|';
pub const STAR: char = '*';
pub const PLUS: char = '+';
pub const OPTIONAL: char = '?';
pub const CONCAT: char = '.';
pub const OPEN_GROUP: char = '(';
pub const CLOSE_GROUP: char = ')';

/// Characters with operator meaning, including the explicit concatenation
/// marker written into postfix output.
pub const RESERVED: [char; 7] = [UNION, STAR, PLUS, OPTIONAL, CONCAT, OPEN_GROUP, CLOSE_GROUP];

#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}

/// The finite set of literal symbols a pattern may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: BTreeSet<Symbol>,
}

impl Alphabet {
    /// Build an alphabet, rejecting operator characters and the epsilon marker.
    pub fn new<I: IntoIterator<Item = Symbol>>(symbols: I) -> Result<Self> {
        let symbols: BTreeSet<Symbol> = symbols.into_iter().collect();
        if let Some(&bad) = symbols
            .iter()
            .find(|&&c| is_epsilon(c) || RESERVED.contains(&c))
        {
            return Err(RegexError::InvalidAlphabet(bad));
        }
        Ok(Self { symbols })
    }

    /// The reference alphabet: `a` through `z`.
    pub fn lowercase() -> Self {
        Self {
            symbols: ('a'..='z').collect(),
        }
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lowercase()
    }
}
