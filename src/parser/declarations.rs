//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Class declarations: `class Name { ... }` or forward `class Name`
//! - Variable declarations: `let const i32 x = 42;`
//! - Function definitions and prototypes: `fun i32 add(i32 a, i32 b) { ... }`
//! - Function parameters and class members
//!
//! # Grammar
//!
//! ```text
//! declaration   ::= "class" class_decl | "let" var_decl | "fun" fun_decl | statement
//! var_decl      ::= specifier* type IDENTIFIER ( "=" expression )? ";"
//! func_arg_decl ::= specifier* type IDENTIFIER ( "=" expression )?
//! fun_decl      ::= specifier* type IDENTIFIER "(" args ")" ( "{" block | ";" )
//! class_decl    ::= IDENTIFIER ( "{" member* "}" )?
//! member        ::= access? "static"? ( "let" var_decl | "fun" fun_decl ) ";"?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

const SPECIFIERS: &[TokenKind] = &[TokenKind::Const];

const ACCESS_QUALIFIERS: &[TokenKind] = &[
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Protected,
];

impl Parser {
    /// Parse a declaration, falling back to a statement
    pub(crate) fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::Class).is_some() {
            return Ok(Stmt::Class(self.parse_class_declaration()?));
        }

        if self.match_token(TokenKind::Let).is_some() {
            return Ok(Stmt::Decl(self.parse_var_decl()?));
        }

        if self.match_token(TokenKind::Fun).is_some() {
            return Ok(Stmt::FunctionDef(self.parse_fun_decl()?));
        }

        self.parse_statement()
    }

    /// Parse a variable declaration after `let`
    pub(crate) fn parse_var_decl(&mut self) -> Result<Decl, ParseError> {
        let decl = self.parse_declarator()?;
        self.expect_token(
            TokenKind::Semicolon,
            "';' required after declaration statement",
        )?;
        Ok(decl)
    }

    /// Parse one function parameter (no terminating `;`)
    pub(crate) fn parse_func_arg_decl(&mut self) -> Result<Decl, ParseError> {
        self.parse_declarator()
    }

    /// `specifier* type IDENTIFIER ( "=" expression )?`
    fn parse_declarator(&mut self) -> Result<Decl, ParseError> {
        let specifiers = self.parse_specifiers()?;
        let ty = self.parse_declared_type()?;
        let identifier = self.expect_identifier("identifier required")?;

        let initializer = if self.match_token(TokenKind::Equal).is_some() {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(Decl {
            specifiers,
            ty,
            identifier,
            initializer,
        })
    }

    /// Collect leading specifiers, rejecting repeats
    fn parse_specifiers(&mut self) -> Result<Vec<TokenKind>, ParseError> {
        let mut specifiers = Vec::new();

        while let Some(token) = self.match_any(SPECIFIERS) {
            if specifiers.contains(&token.kind) {
                return Err(ambiguous(&token, "duplicate specifier"));
            }
            specifiers.push(token.kind);
        }

        Ok(specifiers)
    }

    /// A type that must not be followed by a second primitive type keyword
    fn parse_declared_type(&mut self) -> Result<Type, ParseError> {
        let ty = self.parse_type()?;

        let next = self.stream.current();
        if next.kind.is_primitive_type() {
            return Err(ambiguous(next, "more than one type in declaration"));
        }

        Ok(ty)
    }

    /// Parse a function definition or prototype after `fun`
    pub(crate) fn parse_fun_decl(&mut self) -> Result<FunctionDef, ParseError> {
        let specifiers = self.parse_specifiers()?;
        let return_type = self.parse_declared_type()?;
        let identifier = self.expect_identifier("identifier required")?;

        self.expect_token(TokenKind::LParen, "'(' required before arg list")?;
        let mut params = Vec::new();
        if self.match_token(TokenKind::RParen).is_none() {
            loop {
                params.push(self.parse_func_arg_decl()?);
                if self.match_token(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect_token(TokenKind::RParen, "')' required after arg list")?;
        }

        let body = if self.match_token(TokenKind::LBrace).is_some() {
            Some(self.parse_block()?)
        } else {
            self.expect_token(
                TokenKind::Semicolon,
                "';' required after declaration statement",
            )?;
            None
        };

        log::trace!("parsed function '{}' ({} params)", identifier, params.len());

        Ok(FunctionDef {
            specifiers,
            return_type,
            identifier,
            params,
            body,
        })
    }

    /// Parse a class declaration after `class`
    pub(crate) fn parse_class_declaration(&mut self) -> Result<ClassInfo, ParseError> {
        let identifier = self.expect_identifier("identifier required after 'class'")?;

        let body = if self.match_token(TokenKind::LBrace).is_some() {
            Some(self.parse_class_body()?)
        } else {
            None
        };

        Ok(ClassInfo { identifier, body })
    }

    /// Members up to and including the closing `}`
    fn parse_class_body(&mut self) -> Result<Vec<QualifiedMember>, ParseError> {
        let mut members = Vec::new();

        while self.match_token(TokenKind::RBrace).is_none() {
            members.push(self.parse_class_member()?);
            self.match_token(TokenKind::Semicolon);
        }

        Ok(members)
    }

    fn parse_class_member(&mut self) -> Result<QualifiedMember, ParseError> {
        let access = self
            .match_any(ACCESS_QUALIFIERS)
            .map(|token| AccessQualifier::from_token(token.kind))
            .unwrap_or_default();
        let is_static = self.match_token(TokenKind::Static).is_some();

        let member = if self.match_token(TokenKind::Let).is_some() {
            ClassMember::Field(self.parse_var_decl()?)
        } else if self.match_token(TokenKind::Fun).is_some() {
            ClassMember::Method(self.parse_fun_decl()?)
        } else {
            return Err(self.error_here(
                ParseErrorKind::UnexpectedMember,
                "'let' or 'fun' required for class member",
            ));
        };

        Ok(QualifiedMember {
            access,
            is_static,
            member,
        })
    }
}

fn ambiguous(found: &Token, message: &str) -> ParseError {
    ParseError::new(ParseErrorKind::AmbiguousSpecifiers, found, message)
}
