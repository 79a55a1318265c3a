//! Expression parsing implementation
//!
//! One method per precedence level, each delegating to the next-tighter
//! level for its operands. Binary levels loop, so chains nest left-heavy;
//! assignment recurses on its right-hand side and is right-associative.
//!
//! # Precedence (lowest to highest)
//!
//! ```text
//! assignment     = += -= /= *=        (right)
//! equality       != ==
//! logic_or       ||
//! logic_and      &&
//! bit_or         |
//! bit_xor        ^
//! bit_and        &
//! comparison     < <= > >=
//! shifts         << >>
//! addition       + -
//! multiplication / *
//! access         . ->
//! unary          ! - + ~ ++ -- * &   (prefix)
//! unary_postfix  ++ --
//! subscript      [expr]
//! call           (args)
//! term           literals, identifiers, (expr)
//! ```
//!
//! NOTE: equality sits *above* the logical operators here, unlike C: its
//! operands are full `logic_or` chains, so `a == b || c` groups as
//! `a == (b || c)`. Existing sources depend on this grouping; do not reorder
//! the levels.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

const ASSIGNMENT_OPS: &[TokenKind] = &[
    TokenKind::Equal,
    TokenKind::PlusEqual,
    TokenKind::MinusEqual,
    TokenKind::SlashEqual,
    TokenKind::StarEqual,
];

const PREFIX_OPS: &[TokenKind] = &[
    TokenKind::Bang,
    TokenKind::Minus,
    TokenKind::Plus,
    TokenKind::Tilde,
    TokenKind::PlusPlus,
    TokenKind::MinusMinus,
    TokenKind::Star,
    TokenKind::Amp,
];

const LITERALS: &[TokenKind] = &[
    TokenKind::String,
    TokenKind::Integer,
    TokenKind::Numeric,
    TokenKind::Nil,
    TokenKind::False,
    TokenKind::True,
    TokenKind::Identifier,
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative)
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let mut target = self.parse_equality()?;

        while let Some(op) = self.match_any(ASSIGNMENT_OPS) {
            let value = self.parse_assignment()?;
            target = Expr::Assignment(AssignmentExpr {
                target: Box::new(target),
                op: op.kind,
                value: Box::new(value),
                line: op.line,
            });
        }

        Ok(target)
    }

    /// Shared loop of the left-associative binary levels
    fn parse_binary_level(
        &mut self,
        ops: &[TokenKind],
        operand: fn(&mut Parser) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = self.match_any(ops) {
            let right = operand(self)?;
            left = Expr::Binary(BinaryExpr {
                left: Box::new(left),
                op: op.kind,
                right: Box::new(right),
                line: op.line,
            });
        }

        Ok(left)
    }

    /// Parse equality (== !=) over logic_or operands
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Parser::parse_logic_or,
        )
    }

    /// Parse logical OR (||)
    fn parse_logic_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::PipePipe], Parser::parse_logic_and)
    }

    /// Parse logical AND (&&)
    fn parse_logic_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::AmpAmp], Parser::parse_bit_or)
    }

    /// Parse bitwise OR (|)
    fn parse_bit_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::Pipe], Parser::parse_bit_xor)
    }

    /// Parse bitwise XOR (^)
    fn parse_bit_xor(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::Caret], Parser::parse_bit_and)
    }

    /// Parse bitwise AND (&)
    fn parse_bit_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::Amp], Parser::parse_comparison)
    }

    /// Parse relational (< <= > >=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
            ],
            Parser::parse_shifts,
        )
    }

    /// Parse bitwise shift (<< >>)
    fn parse_shifts(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[TokenKind::LessLess, TokenKind::GreaterGreater],
            Parser::parse_addition,
        )
    }

    /// Parse additive (+ -)
    fn parse_addition(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(
            &[TokenKind::Plus, TokenKind::Minus],
            Parser::parse_multiplication,
        )
    }

    /// Parse multiplicative (/ *)
    fn parse_multiplication(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::Slash, TokenKind::Star], Parser::parse_access)
    }

    /// Parse member access (. ->); both sides are full unary expressions
    fn parse_access(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(&[TokenKind::Dot, TokenKind::Arrow], Parser::parse_unary)
    }

    /// Parse prefix unary (! - + ~ ++ -- * &)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_any(PREFIX_OPS) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryExpr {
                op: op.kind,
                operand: Box::new(operand),
                postfix: false,
                line: op.line,
            }));
        }

        self.parse_unary_postfix()
    }

    /// Parse a single trailing ++ or --
    ///
    /// The operator is looked for after the operand, so `a[1]--` and `f()++`
    /// are accepted as well as a bare `x++`.
    fn parse_unary_postfix(&mut self) -> Result<Expr, ParseError> {
        let operand = self.parse_subscript()?;

        match self.match_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
            Some(op) => Ok(Expr::Unary(UnaryExpr {
                op: op.kind,
                operand: Box::new(operand),
                postfix: true,
                line: op.line,
            })),
            None => Ok(operand),
        }
    }

    /// Parse array subscripts
    fn parse_subscript(&mut self) -> Result<Expr, ParseError> {
        let mut array = self.parse_call()?;

        while let Some(open) = self.match_token(TokenKind::LBracket) {
            let index = self.parse_expression()?;
            self.expect_token(
                TokenKind::RBracket,
                "']' required after array subscription",
            )?;
            array = Expr::Subscript(SubscriptExpr {
                array: Box::new(array),
                index: Box::new(index),
                line: open.line,
            });
        }

        Ok(array)
    }

    /// Parse function calls
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let mut callee = self.parse_term()?;

        while let Some(open) = self.match_token(TokenKind::LParen) {
            let args = self.parse_argument_list()?;
            self.expect_token(TokenKind::RParen, "')' expected after function arg list")?;
            callee = Expr::Call(CallExpr {
                callee: Box::new(callee),
                args,
                line: open.line,
            });
        }

        Ok(callee)
    }

    /// Parse argument list: expr, expr, ... (possibly empty)
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if self.match_token(TokenKind::Comma).is_none() {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary (literals, identifiers, parenthesized expressions)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        if let Some(token) = self.match_any(LITERALS) {
            return Ok(Expr::Literal(token));
        }

        if self.match_token(TokenKind::LParen).is_some() {
            let inner = self.parse_expression()?;
            self.expect_token(TokenKind::RParen, "expected ')' after group expression")?;
            return Ok(Expr::Group(Box::new(inner)));
        }

        Err(self.error_here(ParseErrorKind::ExpectedExpression, "expression expected"))
    }
}
