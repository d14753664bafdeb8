//! Token definitions for the reader.

use std::fmt;
use std::sync::Arc;

/// A token with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Line number (1-based).
    pub line: u32,
    /// Column number (1-based).
    pub column: u32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }
}

/// The kinds of tokens produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `.` on its own (dotted-pair separator).
    Dot,
    /// `'` (quote sugar).
    Quote,
    /// `#t` or `#f`.
    Bool(bool),
    /// A numeric literal.
    Number(f64),
    /// A double-quoted string literal (unescaped contents).
    Text(Arc<str>),
    /// Any other non-delimiter word.
    Symbol(Arc<str>),
    /// End of input.
    Eof,
    /// A lexical error with a description.
    Error(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Dot => write!(f, "."),
            Self::Quote => write!(f, "'"),
            Self::Bool(true) => write!(f, "#t"),
            Self::Bool(false) => write!(f, "#f"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Eof => write!(f, "<eof>"),
            Self::Error(msg) => write!(f, "<error: {msg}>"),
        }
    }
}
