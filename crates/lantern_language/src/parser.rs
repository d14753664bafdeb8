//! Parser (reader) for Lantern source text.
//!
//! The parser turns a token stream into [`Term`] trees. It recognizes proper
//! lists, dotted pairs, and the `'x` quote sugar.

use lantern_foundation::{Error, Result, Term};

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Parses source text into a sequence of top-level terms.
///
/// # Errors
///
/// Returns a parse error on lexical errors, unbalanced parentheses, or
/// misplaced dots.
pub fn parse(source: &str) -> Result<Vec<Term>> {
    let mut parser = Parser::new(source);
    let mut forms = Vec::new();
    while !parser.at_eof() {
        forms.push(parser.parse_term()?);
    }
    Ok(forms)
}

/// Parses source text expected to contain exactly one term.
///
/// # Errors
///
/// Returns a parse error if the source holds zero or more than one term.
pub fn parse_one(source: &str) -> Result<Term> {
    let mut forms = parse(source)?;
    if forms.len() == 1 {
        Ok(forms.remove(0))
    } else {
        Err(Error::parse(
            format!("expected one expression, found {}", forms.len()),
            1,
            1,
        ))
    }
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Self {
            tokens: Lexer::tokenize_all(source),
            position: 0,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn error_at(token: &Token, message: impl Into<String>) -> Error {
        Error::parse(message, token.line, token.column)
    }

    fn parse_term(&mut self) -> Result<Term> {
        let token = self.advance();
        match token.kind {
            TokenKind::Bool(b) => Ok(Term::Bool(b)),
            TokenKind::Number(n) => Ok(Term::Number(n)),
            TokenKind::Text(s) => Ok(Term::Text(s)),
            TokenKind::Symbol(s) => Ok(Term::Symbol(s)),
            TokenKind::Quote => {
                let quoted = self.parse_term()?;
                Ok(Term::list([Term::symbol("quote"), quoted]))
            }
            TokenKind::LParen => self.parse_list_tail(&token),
            TokenKind::RParen => Err(Self::error_at(&token, "unexpected `)`")),
            TokenKind::Dot => Err(Self::error_at(&token, "unexpected `.`")),
            TokenKind::Eof => Err(Self::error_at(&token, "unexpected end of input")),
            TokenKind::Error(ref message) => Err(Self::error_at(&token, message.clone())),
        }
    }

    /// Parses the remainder of a list after `(` has been consumed.
    fn parse_list_tail(&mut self, open: &Token) -> Result<Term> {
        let mut elements = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::RParen => {
                    self.advance();
                    return Ok(Term::list(elements));
                }
                TokenKind::Dot => {
                    let dot = self.advance();
                    if elements.is_empty() {
                        return Err(Self::error_at(&dot, "`.` must follow a list element"));
                    }
                    let tail = self.parse_term()?;
                    let close = self.advance();
                    if close.kind != TokenKind::RParen {
                        return Err(Self::error_at(&close, "expected `)` after dotted tail"));
                    }
                    return Ok(elements
                        .into_iter()
                        .rev()
                        .fold(tail, |tail, head| Term::cons(head, tail)));
                }
                TokenKind::Eof => {
                    return Err(Self::error_at(open, "unclosed `(`"));
                }
                _ => elements.push(self.parse_term()?),
            }
        }
    }
}
