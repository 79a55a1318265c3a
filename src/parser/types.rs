//! Type parsing
//!
//! ```text
//! type    ::= '*' type | trivial ( '*' | '[' INTEGER ']' )*
//! trivial ::= primitive type keyword | IDENTIFIER
//! ```
//!
//! A leading `*` wraps everything parsed after it, so `*i32[3]` is a pointer
//! to an array. Suffix wrappers apply left to right: `i32**[3]` is an array of
//! three pointers to pointers.

use crate::parser::ast::Type;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse a full type
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        if self.match_token(TokenKind::Star).is_some() {
            let inner = self.parse_type()?;
            return Ok(Type::Pointer(Box::new(inner)));
        }

        let mut ty = self.parse_trivial_type()?;

        loop {
            if self.match_token(TokenKind::Star).is_some() {
                ty = Type::Pointer(Box::new(ty));
            } else if self.match_token(TokenKind::LBracket).is_some() {
                let size = self.parse_array_size()?;
                ty = Type::Array {
                    element: Box::new(ty),
                    size,
                };
            } else {
                break;
            }
        }

        Ok(ty)
    }

    fn parse_trivial_type(&mut self) -> Result<Type, ParseError> {
        let current = self.stream.current();
        if current.kind.is_primitive_type() || current.kind == TokenKind::Identifier {
            let token = current.clone();
            self.stream.advance();
            return Ok(Type::Trivial(token));
        }

        Err(self.error_here(ParseErrorKind::ExpectedType, "trivial type required"))
    }

    /// `INTEGER ']'`, the opening bracket already consumed
    fn parse_array_size(&mut self) -> Result<usize, ParseError> {
        let size_token = self.expect_token(
            TokenKind::Integer,
            "array size required after type specification",
        )?;
        let size = size_token
            .integer()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| ParseError::unexpected(&size_token, "invalid array size"))?;

        self.expect_token(
            TokenKind::RBracket,
            "']' required after array size specification",
        )?;
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Type;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{ParseErrorKind, Parser};
    use crate::parser::printer::print_type;

    fn parse(source: &str) -> Type {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_type().unwrap()
    }

    #[test]
    fn test_trivial_types() {
        assert!(matches!(parse("i32"), Type::Trivial(t) if t.kind == TokenKind::I32));
        assert!(matches!(parse("str"), Type::Trivial(t) if t.kind == TokenKind::Str));
        match parse("Point") {
            Type::Trivial(t) => assert_eq!(t.text(), Some("Point")),
            other => panic!("Expected named type, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_wrappers_apply_left_to_right() {
        match parse("i32**[3]") {
            Type::Array { element, size } => {
                assert_eq!(size, 3);
                match *element {
                    Type::Pointer(inner) => {
                        assert!(matches!(*inner, Type::Pointer(_)));
                        assert_eq!(inner.base().kind, TokenKind::I32);
                    }
                    other => panic!("Expected pointer element, got {other:?}"),
                }
            }
            other => panic!("Expected array, got {other:?}"),
        }
        assert_eq!(print_type(&parse("u8[2][4]")), "(array (array u8 2) 4)");
    }

    #[test]
    fn test_leading_star_wraps_remaining_type() {
        assert_eq!(print_type(&parse("**i32")), "(ptr (ptr i32))");
        assert_eq!(print_type(&parse("*i32[3]")), "(ptr (array i32 3))");
    }

    #[test]
    fn test_missing_trivial_type() {
        let mut parser = Parser::new("= 3").unwrap();
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedType);
        assert_eq!(err.found, TokenKind::Equal);

        let mut parser = Parser::new("**").unwrap();
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_array_size_must_be_integer_literal() {
        let mut parser = Parser::new("i32[n]").unwrap();
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.found, TokenKind::Identifier);

        let mut parser = Parser::new("i32[4 x").unwrap();
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.message, "']' required after array size specification");
    }
}
