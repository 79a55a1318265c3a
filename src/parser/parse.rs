//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types and the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, error types, and the top-level loop
//! - `declarations`: class, variable, function and typedef declarations
//! - `statements`: control flow, blocks, expression statements
//! - `types`: pointer/array/trivial types
//! - `expressions`: expressions, one method per precedence level
//!
//! # Error Handling
//!
//! Every parser method returns `Result`. The first syntax error travels back
//! up through `?` to [`Parser::parse_program`], dropping whatever partial
//! nodes were built on the way. There is no resynchronization: one error ends
//! the parse.

use crate::parser::ast::*;
use crate::parser::lexer::{lex, LexError, Token, TokenKind};
use crate::parser::stream::TokenStream;

/// Category of a syntax error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token or category was required and something else was found
    UnexpectedToken,
    /// The stream ran out where more input was required
    UnexpectedEof,
    /// No expression could start at the current token
    ExpectedExpression,
    /// No trivial type could start at the current token
    ExpectedType,
    /// A class body item did not start with `let` or `fun`
    UnexpectedMember,
    /// Repeated specifier or more than one type in one declaration
    AmbiguousSpecifiers,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Syntax error: unexpected {found} at line {line}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub found: TokenKind,
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, found: &Token, message: impl Into<String>) -> Self {
        let kind = if found.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            kind
        };
        Self {
            kind,
            found: found.kind,
            line: found.line,
            message: message.into(),
        }
    }

    pub fn unexpected(found: &Token, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken, found, message)
    }
}

/// Parser construction from raw text can fail in the lexer too
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Recursive descent parser for hatch
pub struct Parser {
    pub(crate) stream: TokenStream,
}

impl Parser {
    /// Lex `source` with the shared keyword table and wrap the result.
    pub fn new(source: &str) -> Result<Self, LexError> {
        Ok(Self::from_stream(lex(source)?))
    }

    pub fn from_stream(mut stream: TokenStream) -> Self {
        stream.rewind();
        Self { stream }
    }

    /// Parse the entire program: declarations, each optionally followed by
    /// `;`, until the stream is exhausted.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.stream.is_at_end() {
            let decl = self.parse_declaration()?;
            program.declarations.push(decl);
            self.stream.match_any(&[TokenKind::Semicolon]);
        }

        log::debug!(
            "parsed {} top-level declarations",
            program.declarations.len()
        );
        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.stream.check(&[kind])
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        self.stream.match_any(&[kind])
    }

    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        self.stream.match_any(kinds)
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        self.stream.expect(kind, message)
    }

    pub(crate) fn expect_identifier(&mut self, message: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Identifier, message)
    }

    /// Error of `kind` at the current token
    pub(crate) fn error_here(&self, kind: ParseErrorKind, message: &str) -> ParseError {
        ParseError::new(kind, self.stream.current(), message)
    }
}

/// Lex and parse `source` in one step.
pub fn parse_source(source: &str) -> Result<Program, SourceError> {
    let mut parser = Parser::new(source)?;
    Ok(parser.parse_program()?)
}
