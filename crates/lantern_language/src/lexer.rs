//! Lexer for Lantern source text.
//!
//! The lexer converts s-expression source into a stream of tokens. It is
//! deliberately permissive about symbol contents: anything that is not
//! whitespace, a delimiter, or a literal is a symbol.

use crate::token::{Token, TokenKind};

/// Characters that terminate a symbol or number.
const DELIMITERS: &str = "()';\"";

/// Lexer for Lantern source code.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(TokenKind::Eof, line, column);
        };

        let kind = match c {
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '\'' => {
                self.advance();
                TokenKind::Quote
            }
            '"' => self.scan_text(),
            '#' => self.scan_bool(),
            _ => self.scan_word(),
        };

        Token::new(kind, line, column)
    }

    /// Tokenizes all source and returns a vector of tokens, ending with EOF.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.rest = &self.rest[c.len_utf8()..];
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => self.advance(),
                Some(';') => {
                    while let Some(c) = self.peek_char() {
                        self.advance();
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans a string literal, handling `\"`, `\\`, `\n`, and `\t` escapes.
    fn scan_text(&mut self) -> TokenKind {
        self.advance(); // opening quote
        let mut contents = String::new();
        loop {
            match self.peek_char() {
                None => return TokenKind::Error("unterminated string literal".to_string()),
                Some('"') => {
                    self.advance();
                    return TokenKind::Text(contents.into());
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some('n') => contents.push('\n'),
                        Some('t') => contents.push('\t'),
                        Some(c) => contents.push(c),
                        None => {
                            return TokenKind::Error("unterminated string literal".to_string());
                        }
                    }
                    self.advance();
                }
                Some(c) => {
                    contents.push(c);
                    self.advance();
                }
            }
        }
    }

    /// Scans a `#t`/`#f` boolean literal.
    fn scan_bool(&mut self) -> TokenKind {
        let word = self.take_word();
        match word.as_str() {
            "#t" | "#true" => TokenKind::Bool(true),
            "#f" | "#false" => TokenKind::Bool(false),
            other => TokenKind::Error(format!("unknown literal: {other}")),
        }
    }

    /// Scans a number, the dotted-pair separator, or a symbol.
    fn scan_word(&mut self) -> TokenKind {
        let word = self.take_word();
        if word == "." {
            return TokenKind::Dot;
        }
        if looks_numeric(&word) {
            if let Ok(n) = word.parse::<f64>() {
                return TokenKind::Number(n);
            }
        }
        TokenKind::Symbol(word.into())
    }

    fn take_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || DELIMITERS.contains(c) {
                break;
            }
            word.push(c);
            self.advance();
        }
        word
    }
}

/// Returns true if a word should be tried as a numeric literal.
///
/// Symbols like `-`, `+`, and `...` must stay symbols, so a sign or dot must
/// be followed by a digit.
fn looks_numeric(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-' | '.') => chars.next().is_some_and(|c| c.is_ascii_digit() || c == '.'),
        _ => false,
    }
}
