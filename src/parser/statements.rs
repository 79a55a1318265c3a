//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Control flow: `if`, `while`, `for`, `do-while`
//! - Jump statements: `return`, `break`, `continue`
//! - Compound statements: `{ ... }`
//! - Type aliases: `typedef i32* IntPtr;`
//! - Expression statements: function calls, assignments
//!
//! # Grammar
//!
//! ```text
//! statement ::= for_stmt | if_stmt | while_stmt | do_while_stmt
//!             | return_stmt | loop_ctrl_stmt | block | typedef_stmt
//!             | expr_stmt
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::For).is_some() {
            return self.parse_for_statement();
        }

        if self.match_token(TokenKind::If).is_some() {
            return self.parse_if_statement();
        }

        if self.match_token(TokenKind::While).is_some() {
            return self.parse_while_statement();
        }

        if self.match_token(TokenKind::Do).is_some() {
            return self.parse_do_while_statement();
        }

        if self.match_token(TokenKind::Return).is_some() {
            return self.parse_return_statement();
        }

        if let Some(keyword) = self.match_any(&[TokenKind::Break, TokenKind::Continue]) {
            self.expect_token(
                TokenKind::Semicolon,
                "';' required after loop control statement",
            )?;
            return Ok(Stmt::LoopControl(keyword));
        }

        if self.match_token(TokenKind::LBrace).is_some() {
            return Ok(Stmt::Block(self.parse_block()?));
        }

        if self.match_token(TokenKind::Typedef).is_some() {
            return self.parse_typedef();
        }

        self.parse_expression_statement()
    }

    /// Parse block contents after the opening `{`, through the closing `}`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while self.match_token(TokenKind::RBrace).is_none() {
            if self.stream.is_at_end() {
                return Err(ParseError::unexpected(
                    self.stream.current(),
                    "'}' required to close block",
                ));
            }
            statements.push(self.parse_declaration()?);
            self.match_token(TokenKind::Semicolon);
        }

        Ok(statements)
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::LParen, "'(' expected before if expression")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "')' expected after if expression")?;

        let body = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(TokenKind::Else).is_some() {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            body,
            else_branch,
        }))
    }

    /// Parse for loop
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::LParen, "'(' expected after for")?;

        // Both initializer forms consume their own ';'
        let init = if self.match_token(TokenKind::Semicolon).is_some() {
            None
        } else if self.check(TokenKind::Let) {
            Some(Box::new(self.parse_declaration()?))
        } else {
            Some(Box::new(self.parse_expression_statement()?))
        };

        let condition = if self.match_token(TokenKind::Semicolon).is_some() {
            None
        } else {
            let condition = self.parse_expression()?;
            self.expect_token(TokenKind::Semicolon, "';' required after condition")?;
            Some(condition)
        };

        let increment = if self.match_token(TokenKind::RParen).is_some() {
            None
        } else {
            let increment = self.parse_expression()?;
            self.expect_token(TokenKind::RParen, "')' expected before for body")?;
            Some(increment)
        };

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For(ForStmt {
            init,
            condition,
            increment,
            body,
        }))
    }

    /// Parse while loop
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_token(TokenKind::LParen, "'(' required before while condition")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "')' required after while condition")?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            do_while: false,
        }))
    }

    /// Parse do-while loop
    fn parse_do_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let body = Box::new(self.parse_statement()?);

        self.expect_token(TokenKind::While, "'while' required after do block")?;
        self.expect_token(TokenKind::LParen, "'(' required before while condition")?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, "')' required after while condition")?;
        self.expect_token(TokenKind::Semicolon, "';' required after do-while")?;

        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            do_while: true,
        }))
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::Semicolon).is_some() {
            return Ok(Stmt::Return(None));
        }

        let value = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, "';' required after return statement")?;
        Ok(Stmt::Return(Some(value)))
    }

    /// Parse typedef: `typedef type IDENTIFIER ;`
    fn parse_typedef(&mut self) -> Result<Stmt, ParseError> {
        let ty = self.parse_type()?;
        let alias = self.expect_identifier("type alias required")?;
        self.expect_token(TokenKind::Semicolon, "';' required after typedef statement")?;

        Ok(Stmt::Typedef(TypedefDecl { ty, alias }))
    }

    /// Parse expression statement
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        self.expect_token(
            TokenKind::Semicolon,
            "';' required after expression statement",
        )?;
        Ok(Stmt::Expression(expr))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseError, ParseErrorKind, Parser};
    use crate::parser::printer::print_stmt;

    fn parse(source: &str) -> Stmt {
        let mut parser = Parser::new(source).unwrap();
        let stmt = parser.parse_statement().unwrap();
        assert!(parser.stream.is_at_end(), "trailing tokens in {source:?}");
        stmt
    }

    fn parse_err(source: &str) -> ParseError {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_statement().unwrap_err()
    }

    #[test]
    fn test_if_else() {
        match parse("if (x < 1) y = 2; else { y = 3; }") {
            Stmt::If(IfStmt {
                condition,
                body,
                else_branch,
            }) => {
                assert!(matches!(condition, Expr::Binary(BinaryExpr { op: TokenKind::Less, .. })));
                assert!(matches!(*body, Stmt::Expression(Expr::Assignment(_))));
                assert!(matches!(else_branch.as_deref(), Some(Stmt::Block(b)) if b.len() == 1));
            }
            other => panic!("Expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_else_binds_inner_if() {
        match parse("if (a) if (b) x; else y;") {
            Stmt::If(outer) => {
                assert!(outer.else_branch.is_none());
                assert!(matches!(*outer.body, Stmt::If(ref inner) if inner.else_branch.is_some()));
            }
            other => panic!("Expected if statement, got {other:?}"),
        }
    }

    #[test]
    fn test_for_with_declaration() {
        match parse("for (let i32 i = 0; i < 10; i++) { sum += i; }") {
            Stmt::For(ForStmt {
                init,
                condition,
                increment,
                body,
            }) => {
                match init.as_deref() {
                    Some(Stmt::Decl(decl)) => {
                        assert_eq!(decl.name(), "i");
                        assert!(decl.initializer.is_some());
                    }
                    other => panic!("Expected declaration initializer, got {other:?}"),
                }
                assert!(condition.is_some());
                assert!(matches!(
                    increment,
                    Some(Expr::Unary(UnaryExpr { postfix: true, .. }))
                ));
                assert!(matches!(*body, Stmt::Block(_)));
            }
            other => panic!("Expected for statement, got {other:?}"),
        }
    }

    #[test]
    fn test_for_clauses_optional() {
        match parse("for (;;) break;") {
            Stmt::For(f) => {
                assert!(f.init.is_none());
                assert!(f.condition.is_none());
                assert!(f.increment.is_none());
                assert!(matches!(*f.body, Stmt::LoopControl(ref t) if t.kind == TokenKind::Break));
            }
            other => panic!("Expected for statement, got {other:?}"),
        }
        assert_eq!(
            print_stmt(&parse("for (i = 0; ; ) continue;")),
            "(for (expr (= i 0)) _ _ (continue))"
        );
    }

    #[test]
    fn test_while_and_do_while() {
        assert!(matches!(
            parse("while (n > 0) n -= 1;"),
            Stmt::While(WhileStmt { do_while: false, .. })
        ));
        match parse("do { n++; } while (n < 3);") {
            Stmt::While(WhileStmt {
                do_while, body, ..
            }) => {
                assert!(do_while);
                assert!(matches!(*body, Stmt::Block(_)));
            }
            other => panic!("Expected do-while, got {other:?}"),
        }
    }

    #[test]
    fn test_while_requires_parentheses() {
        let err = parse_err("while n > 0 n -= 1;");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.message, "'(' required before while condition");
    }

    #[test]
    fn test_do_while_missing_semicolon() {
        let err = parse_err("do x; while (y)");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.message, "';' required after do-while");
    }

    #[test]
    fn test_return_forms() {
        assert!(matches!(parse("return;"), Stmt::Return(None)));
        assert!(matches!(parse("return a + 1;"), Stmt::Return(Some(Expr::Binary(_)))));

        let err = parse_err("return 1");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_loop_control_keeps_keyword() {
        match parse("continue;") {
            Stmt::LoopControl(token) => {
                assert_eq!(token.kind, TokenKind::Continue);
                assert_eq!(token.line, 1);
            }
            other => panic!("Expected loop control, got {other:?}"),
        }
        let err = parse_err("break }");
        assert_eq!(err.found, TokenKind::RBrace);
    }

    #[test]
    fn test_typedef() {
        match parse("typedef i32* IntPtr;") {
            Stmt::Typedef(TypedefDecl { ty, alias }) => {
                assert!(matches!(ty, Type::Pointer(_)));
                assert_eq!(alias.text(), Some("IntPtr"));
            }
            other => panic!("Expected typedef, got {other:?}"),
        }
        let err = parse_err("typedef i32;");
        assert_eq!(err.message, "type alias required");
    }

    #[test]
    fn test_block_with_optional_terminators() {
        match parse("{ let i32 x = 1;; x = 2; ; }") {
            Stmt::Block(items) => assert_eq!(items.len(), 2),
            other => panic!("Expected block, got {other:?}"),
        }
        assert!(matches!(parse("{}"), Stmt::Block(ref b) if b.is_empty()));
    }

    #[test]
    fn test_unclosed_block_is_unexpected_eof() {
        let err = parse_err("{ x = 1;");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.found, TokenKind::Eof);
    }

    #[test]
    fn test_expression_statement_needs_semicolon() {
        let err = parse_err("f(1) g(2);");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, TokenKind::Identifier);
        assert_eq!(err.message, "';' required after expression statement");
    }
}
