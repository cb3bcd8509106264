//! Infix to postfix translation.
//!
//! Juxtaposition in a pattern is made explicit with a concatenation operator,
//! then a shunting-yard pass reorders the tokens so the fragment builder can
//! evaluate them with a single operand stack and no lookahead.

use crate::automaton::symbol::{
    Alphabet, CLOSE_GROUP, CONCAT, OPEN_GROUP, OPTIONAL, PLUS, STAR, Symbol, UNION,
};
use crate::error::{RegexError, Result};
use log::debug;
use std::fmt;

/// One element of a postfix token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(Symbol),
    Concat,
    Union,
    Star,
    Plus,
    Optional,
}

impl Token {
    /// Binding strength: union < concatenation < the postfix operators.
    /// Literals never sit on the operator stack.
    fn precedence(self) -> u8 {
        match self {
            Token::Union => 1,
            Token::Concat => 2,
            Token::Star | Token::Plus | Token::Optional => 3,
            Token::Literal(_) => 4,
        }
    }

    /// Number of operands the token consumes in postfix evaluation.
    pub fn arity(self) -> usize {
        match self {
            Token::Literal(_) => 0,
            Token::Star | Token::Plus | Token::Optional => 1,
            Token::Concat | Token::Union => 2,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Literal(c) => c,
            Token::Concat => CONCAT,
            Token::Union => UNION,
            Token::Star => STAR,
            Token::Plus => PLUS,
            Token::Optional => OPTIONAL,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A pattern in postfix order, with explicit concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{token}"))
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Infix element: a postfix token or a grouping delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Token(Token),
    Open,
    Close,
}

/// Operator stack entry. Open groups remember their position for error reports.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator(Token),
    Open(usize),
}

/// Translate a pattern over the lowercase alphabet into postfix.
pub fn to_postfix(pattern: &str) -> Result<Postfix> {
    to_postfix_with(pattern, &Alphabet::lowercase())
}

/// Translate a pattern over `alphabet` into postfix.
pub fn to_postfix_with(pattern: &str, alphabet: &Alphabet) -> Result<Postfix> {
    let lexemes = insert_concatenation(&lex(pattern, alphabet)?);

    let mut output = Vec::with_capacity(lexemes.len());
    let mut stack: Vec<Pending> = Vec::new();

    for &(position, lexeme) in &lexemes {
        match lexeme {
            Lexeme::Open => stack.push(Pending::Open(position)),
            Lexeme::Close => loop {
                match stack.pop() {
                    Some(Pending::Operator(op)) => output.push(op),
                    Some(Pending::Open(_)) => break,
                    None => return Err(RegexError::UnbalancedGroup { position }),
                }
            },
            Lexeme::Token(literal @ Token::Literal(_)) => output.push(literal),
            Lexeme::Token(op) => {
                // Equal precedence pops too, which makes chains left-associative.
                while let Some(&Pending::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(top);
                    stack.pop();
                }
                stack.push(Pending::Operator(op));
            }
        }
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Operator(op) => output.push(op),
            Pending::Open(position) => return Err(RegexError::UnbalancedGroup { position }),
        }
    }

    let postfix = Postfix::from_tokens(output);
    debug!("translated {pattern:?} to postfix {postfix}");
    Ok(postfix)
}

fn lex(pattern: &str, alphabet: &Alphabet) -> Result<Vec<(usize, Lexeme)>> {
    pattern
        .chars()
        .enumerate()
        .map(|(position, c)| {
            let lexeme = match c {
                OPEN_GROUP => Lexeme::Open,
                CLOSE_GROUP => Lexeme::Close,
                UNION => Lexeme::Token(Token::Union),
                STAR => Lexeme::Token(Token::Star),
                PLUS => Lexeme::Token(Token::Plus),
                OPTIONAL => Lexeme::Token(Token::Optional),
                c if alphabet.contains(c) => Lexeme::Token(Token::Literal(c)),
                symbol => return Err(RegexError::UnsupportedSymbol { symbol, position }),
            };
            Ok((position, lexeme))
        })
        .collect()
}

/// Make juxtaposition explicit: `ab` becomes `a.b`, `a(b)` becomes `a.(b)`.
fn insert_concatenation(lexemes: &[(usize, Lexeme)]) -> Vec<(usize, Lexeme)> {
    let mut out = Vec::with_capacity(lexemes.len() * 2);
    for (i, &(position, lexeme)) in lexemes.iter().enumerate() {
        out.push((position, lexeme));
        if let Some(&(_, next)) = lexemes.get(i + 1) {
            if joins(lexeme, next) {
                out.push((position, Lexeme::Token(Token::Concat)));
            }
        }
    }
    out
}

fn joins(left: Lexeme, right: Lexeme) -> bool {
    let left_open = matches!(left, Lexeme::Open | Lexeme::Token(Token::Union));
    let right_closed = matches!(
        right,
        Lexeme::Close
            | Lexeme::Token(Token::Union | Token::Star | Token::Plus | Token::Optional)
    );
    !left_open && !right_closed
}
