//! Positional cursor over the lexer's output
//!
//! The cursor always sits in `[0, len]`. Reading at `len` yields an EOF
//! sentinel instead of failing, and advancing past the end is a no-op, so the
//! parser never has to special-case running off the token list.

use super::lexer::{Token, TokenKind};
use super::parse::ParseError;

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    eof: Token,
}

impl TokenStream {
    /// `last_line` is the line the EOF sentinel reports.
    pub fn new(tokens: Vec<Token>, last_line: usize) -> Self {
        Self {
            tokens,
            position: 0,
            eof: Token::new(TokenKind::Eof, last_line),
        }
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

    pub fn position(&self) -> usize {
        self.position
    }

    /// Token at the cursor, or the EOF sentinel.
    pub fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    /// Token just before the cursor, or the EOF sentinel at position 0.
    pub fn previous(&self) -> &Token {
        match self.position.checked_sub(1) {
            Some(idx) => self.tokens.get(idx).unwrap_or(&self.eof),
            None => &self.eof,
        }
    }

    /// Token one past the cursor, or the EOF sentinel.
    pub fn peek_next(&self) -> &Token {
        self.tokens.get(self.position + 1).unwrap_or(&self.eof)
    }

    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Whether the current token is one of `kinds`. Never advances.
    pub fn check(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current().kind)
    }

    /// Consume and return the current token if it is one of `kinds`.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.check(kinds) {
            let token = self.current().clone();
            self.advance();
            Some(token)
        } else {
            None
        }
    }

    /// Consume a token of `kind` or fail with `message`.
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        self.match_any(&[kind])
            .ok_or_else(|| ParseError::unexpected(self.current(), message))
    }
}
