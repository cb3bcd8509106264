use thiserror::Error;

/// Reasons a pattern is rejected. Construction either succeeds completely or
/// fails with one of these; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    /// A `)` without a matching `(`, or a `(` never closed.
    #[error("unbalanced group at position {position}")]
    UnbalancedGroup { position: usize },

    /// An operator is missing operands, the expression is empty, or operands
    /// are left over after the whole postfix stream is consumed.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    #[error("unsupported symbol {symbol:?} at position {position}")]
    UnsupportedSymbol { symbol: char, position: usize },

    /// An alphabet may not contain operator characters or the epsilon marker.
    #[error("symbol {0:?} cannot be part of an alphabet")]
    InvalidAlphabet(char),
}

pub type Result<T> = std::result::Result<T, RegexError>;
