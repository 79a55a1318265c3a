//! Lexer (tokenizer) for hatch source code
//!
//! Converts preprocessed source text into a [`TokenStream`] consumed by the
//! parser. Identifiers are resolved against a read-only [`Keywords`] table;
//! anything not in the table is a plain `IDENTIFIER`.
//!
//! A `#` that survives preprocessing (an unknown directive) at the start of a
//! line is skipped up to the end of that line, matching the preprocessor's "warn and leave it"
//! policy.

use super::stream::TokenStream;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// All token kinds produced by the lexer.
///
/// The set is closed: [`TokenKind::name`] is total over it and is the only
/// thing diagnostics ever print for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    Semicolon,
    Colon,
    Comma,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Operators
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    Arrow,
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    Less,
    LessEqual,
    LessLess,
    Greater,
    GreaterEqual,
    GreaterGreater,
    Equal,
    EqualEqual,
    Bang,
    BangEqual,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Tilde,
    TildeEqual,

    // Literals
    String,
    Integer,
    Numeric,
    Identifier,
    True,
    False,
    Nil,

    // Control keywords
    While,
    If,
    Else,
    For,
    Do,
    Switch,
    Return,
    Continue,
    Break,

    // Primitive types
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Float,
    Double,
    Str,
    Void,

    // Declaration keywords
    Const,
    Static,
    Class,
    Union,
    Let,
    Fun,
    Typedef,
    Sizeof,

    // Access qualifiers
    Public,
    Private,
    Protected,

    // End of stream sentinel
    Eof,
}

impl TokenKind {
    /// Upper-case diagnostic name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LSQBRACE",
            TokenKind::RBracket => "RSQBRACE",
            TokenKind::Plus => "PLUS",
            TokenKind::PlusPlus => "DOUBLE_PLUS",
            TokenKind::PlusEqual => "PLUS_EQUAL",
            TokenKind::Minus => "MINUS",
            TokenKind::MinusMinus => "DOUBLE_MINUS",
            TokenKind::MinusEqual => "MINUS_EQUAL",
            TokenKind::Arrow => "POINTER",
            TokenKind::Star => "ASTERISK",
            TokenKind::StarEqual => "ASTERISK_EQUAL",
            TokenKind::Slash => "SLASH",
            TokenKind::SlashEqual => "SLASH_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::LessLess => "DOUBLE_LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::GreaterGreater => "DOUBLE_GREATER",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Amp => "AMPERSAND",
            TokenKind::AmpAmp => "DOUBLE_AMPERSAND",
            TokenKind::Pipe => "OR",
            TokenKind::PipePipe => "DOUBLE_OR",
            TokenKind::Caret => "XOR",
            TokenKind::Tilde => "TILDA",
            TokenKind::TildeEqual => "TILDA_EQUAL",
            TokenKind::String => "STRING",
            TokenKind::Integer => "INTEGER",
            TokenKind::Numeric => "NUMERIC",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Nil => "NIL",
            TokenKind::While => "WHILE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::Do => "DO",
            TokenKind::Switch => "SWITCH",
            TokenKind::Return => "RETURN",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Break => "BREAK",
            TokenKind::U8 => "U8",
            TokenKind::U16 => "U16",
            TokenKind::U32 => "U32",
            TokenKind::U64 => "U64",
            TokenKind::I8 => "I8",
            TokenKind::I16 => "I16",
            TokenKind::I32 => "I32",
            TokenKind::I64 => "I64",
            TokenKind::Float => "FLOAT",
            TokenKind::Double => "DOUBLE",
            TokenKind::Str => "STR",
            TokenKind::Void => "VOID",
            TokenKind::Const => "CONST",
            TokenKind::Static => "STATIC",
            TokenKind::Class => "CLASS",
            TokenKind::Union => "UNION",
            TokenKind::Let => "LET",
            TokenKind::Fun => "FUN",
            TokenKind::Typedef => "TYPEDEF",
            TokenKind::Sizeof => "SIZEOF",
            TokenKind::Public => "PUBLIC",
            TokenKind::Private => "PRIVATE",
            TokenKind::Protected => "PROTECTED",
            TokenKind::Eof => "EOF",
        }
    }

    /// Source spelling of fixed-text kinds; `None` for literals and EOF.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Plus => "+",
            TokenKind::PlusPlus => "++",
            TokenKind::PlusEqual => "+=",
            TokenKind::Minus => "-",
            TokenKind::MinusMinus => "--",
            TokenKind::MinusEqual => "-=",
            TokenKind::Arrow => "->",
            TokenKind::Star => "*",
            TokenKind::StarEqual => "*=",
            TokenKind::Slash => "/",
            TokenKind::SlashEqual => "/=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::LessLess => "<<",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::GreaterGreater => ">>",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::TildeEqual => "~=",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::While => "while",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::Do => "do",
            TokenKind::Switch => "switch",
            TokenKind::Return => "return",
            TokenKind::Continue => "continue",
            TokenKind::Break => "break",
            TokenKind::U8 => "u8",
            TokenKind::U16 => "u16",
            TokenKind::U32 => "u32",
            TokenKind::U64 => "u64",
            TokenKind::I8 => "i8",
            TokenKind::I16 => "i16",
            TokenKind::I32 => "i32",
            TokenKind::I64 => "i64",
            TokenKind::Float => "float",
            TokenKind::Double => "double",
            TokenKind::Str => "str",
            TokenKind::Void => "void",
            TokenKind::Const => "const",
            TokenKind::Static => "static",
            TokenKind::Class => "class",
            TokenKind::Union => "union",
            TokenKind::Let => "let",
            TokenKind::Fun => "fun",
            TokenKind::Typedef => "typedef",
            TokenKind::Sizeof => "sizeof",
            TokenKind::Public => "public",
            TokenKind::Private => "private",
            TokenKind::Protected => "protected",
            TokenKind::String
            | TokenKind::Integer
            | TokenKind::Numeric
            | TokenKind::Identifier
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Primitive type keywords usable as a trivial type.
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::Void
                | TokenKind::I8
                | TokenKind::I16
                | TokenKind::I32
                | TokenKind::I64
                | TokenKind::U8
                | TokenKind::U16
                | TokenKind::U32
                | TokenKind::U64
                | TokenKind::Str
                | TokenKind::Float
                | TokenKind::Double
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Literal payload carried by a token. A token holds at most one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Str(String),
    Int(i64),
    Float(f64),
}

/// A lexical unit: kind, the 1-based line it starts on and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self {
            kind,
            line,
            value: TokenValue::None,
        }
    }

    pub fn with_value(kind: TokenKind, line: usize, value: TokenValue) -> Self {
        Self { kind, line, value }
    }

    /// Text payload of STRING and IDENTIFIER tokens.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            TokenValue::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn float(&self) -> Option<f64> {
        match self.value {
            TokenValue::Float(x) => Some(x),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Str(s) if self.kind == TokenKind::String => {
                write!(f, "{} \"{}\"", self.kind, s)
            }
            TokenValue::Str(s) => write!(f, "{} '{}'", self.kind, s),
            TokenValue::Int(n) => write!(f, "{} {}", self.kind, n),
            TokenValue::Float(x) => write!(f, "{} {}", self.kind, x),
            TokenValue::None => write!(f, "{}", self.kind),
        }
    }
}

/// Reserved-word table mapping spellings to keyword kinds.
#[derive(Debug, Clone)]
pub struct Keywords {
    table: FxHashMap<&'static str, TokenKind>,
}

const RESERVED: &[TokenKind] = &[
    TokenKind::While,
    TokenKind::If,
    TokenKind::Else,
    TokenKind::For,
    TokenKind::Do,
    TokenKind::Switch,
    TokenKind::Return,
    TokenKind::Continue,
    TokenKind::Break,
    TokenKind::U8,
    TokenKind::U16,
    TokenKind::U32,
    TokenKind::U64,
    TokenKind::I8,
    TokenKind::I16,
    TokenKind::I32,
    TokenKind::I64,
    TokenKind::Float,
    TokenKind::Double,
    TokenKind::Str,
    TokenKind::Void,
    TokenKind::Const,
    TokenKind::Static,
    TokenKind::Nil,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Class,
    TokenKind::Union,
    TokenKind::Let,
    TokenKind::Fun,
    TokenKind::Typedef,
    TokenKind::Sizeof,
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Protected,
];

impl Keywords {
    /// The standard table of the language.
    pub fn standard() -> Self {
        let mut table = FxHashMap::default();
        for &kind in RESERVED {
            if let Some(text) = kind.lexeme() {
                table.insert(text, kind);
            }
        }
        table.insert("pub", TokenKind::Public);
        Self { table }
    }

    /// Process-wide standard table, built on first use.
    pub fn shared() -> &'static Keywords {
        static KEYWORDS: OnceLock<Keywords> = OnceLock::new();
        KEYWORDS.get_or_init(Keywords::standard)
    }

    /// Drop a spelling so it lexes as a plain identifier.
    pub fn remove(&mut self, word: &str) -> Option<TokenKind> {
        self.table.remove(word)
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.table.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString { line: usize },

    #[error("unterminated block comment starting at line {line}")]
    UnterminatedComment { line: usize },

    #[error("unexpected character '{ch}' at line {line}")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("invalid numeric literal '{text}' at line {line}")]
    InvalidNumber { text: String, line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedString { line }
            | LexError::UnterminatedComment { line }
            | LexError::UnexpectedCharacter { line, .. }
            | LexError::InvalidNumber { line, .. } => *line,
        }
    }
}

/// Tokenize `source` with the shared keyword table.
pub fn lex(source: &str) -> Result<TokenStream, LexError> {
    Lexer::new(source, Keywords::shared()).tokenize()
}

/// Lexer for hatch source code
pub struct Lexer<'k> {
    input: Vec<char>,
    position: usize,
    line: usize,
    keywords: &'k Keywords,
}

impl<'k> Lexer<'k> {
    pub fn new(input: &str, keywords: &'k Keywords) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            keywords,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Result<TokenStream, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                break;
            }

            if self.peek() == Some('#') && self.at_line_start() {
                self.skip_preprocessor_directive();
                continue;
            }

            let token = self.next_token()?;
            log::trace!("lexed {} at line {}", token, token.line);
            tokens.push(token);
        }

        log::debug!("lexed {} tokens over {} lines", tokens.len(), self.line);
        Ok(TokenStream::new(tokens, self.line))
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, line));
        };

        let kind = match ch {
            '"' => return self.string_literal(),
            '0'..='9' => return self.number_literal(ch),
            'a'..='z' | 'A'..='Z' | '_' => return Ok(self.identifier_or_keyword(ch)),

            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '^' => TokenKind::Caret,

            '+' => {
                if self.match_char('+') {
                    TokenKind::PlusPlus
                } else if self.match_char('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.match_char('-') {
                    TokenKind::MinusMinus
                } else if self.match_char('=') {
                    TokenKind::MinusEqual
                } else if self.match_char('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.match_char('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.match_char('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '=' => {
                if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEqual
                } else if self.match_char('<') {
                    TokenKind::LessLess
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else if self.match_char('>') {
                    TokenKind::GreaterGreater
                } else {
                    TokenKind::Greater
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::PipePipe
                } else {
                    TokenKind::Pipe
                }
            }
            '~' => {
                if self.match_char('=') {
                    TokenKind::TildeEqual
                } else {
                    TokenKind::Tilde
                }
            }

            _ => return Err(LexError::UnexpectedCharacter { ch, line }),
        };

        Ok(Token::new(kind, line))
    }

    /// Parse string literal. No escape processing; the payload is the raw
    /// text between the quotes.
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                return Ok(Token::with_value(
                    TokenKind::String,
                    line,
                    TokenValue::Str(string),
                ));
            }
            string.push(ch);
        }

        Err(LexError::UnterminatedString { line })
    }

    /// Parse numeric literal: digits, optionally `.` and more digits.
    fn number_literal(&mut self, first_digit: char) -> Result<Token, LexError> {
        let line = self.line;
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        let is_float = self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit());

        if is_float {
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);

            let value = num_str.parse::<f64>().map_err(|_| LexError::InvalidNumber {
                text: num_str.clone(),
                line,
            })?;
            return Ok(Token::with_value(
                TokenKind::Numeric,
                line,
                TokenValue::Float(value),
            ));
        }

        let value = num_str.parse::<i64>().map_err(|_| LexError::InvalidNumber {
            text: num_str.clone(),
            line,
        })?;
        Ok(Token::with_value(TokenKind::Integer, line, TokenValue::Int(value)))
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            buf.push(ch);
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Token {
        let line = self.line;
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.lookup(&ident) {
            Some(kind) => Token::new(kind, line),
            None => Token::with_value(TokenKind::Identifier, line, TokenValue::Str(ident)),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...), leaving the newline in place
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a block comment (/* ... */). Nested openers must be closed
    /// before the outer comment ends.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        let mut depth = 1usize;
        while !self.is_at_end() {
            if self.peek() == Some('/') && self.peek_ahead(1) == Some('*') {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            } else {
                self.advance();
            }
        }

        Err(LexError::UnterminatedComment { line: start_line })
    }

    /// Skip an unprocessed preprocessor directive up to the end of the line
    fn skip_preprocessor_directive(&mut self) {
        log::debug!("skipping unprocessed directive at line {}", self.line);
        self.skip_line_comment();
    }

    /// Whether only blanks precede the cursor on its line
    fn at_line_start(&self) -> bool {
        self.input[..self.position]
            .iter()
            .rev()
            .take_while(|&&ch| ch != '\n')
            .all(|&ch| matches!(ch, ' ' | '\t' | '\r'))
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .unwrap()
            .tokens()
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let stream = lex("fun i32 main() { return 0; }").unwrap();
        let tokens = stream.tokens();

        assert_eq!(tokens[0].kind, TokenKind::Fun);
        assert_eq!(tokens[1].kind, TokenKind::I32);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].text(), Some("main"));
        assert_eq!(tokens[3].kind, TokenKind::LParen);
        assert_eq!(tokens[4].kind, TokenKind::RParen);
        assert_eq!(tokens[5].kind, TokenKind::LBrace);
        assert_eq!(tokens[6].kind, TokenKind::Return);
        assert_eq!(tokens[7].kind, TokenKind::Integer);
        assert_eq!(tokens[7].integer(), Some(0));
        assert_eq!(tokens[8].kind, TokenKind::Semicolon);
        assert_eq!(tokens[9].kind, TokenKind::RBrace);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("++ -- += -= *= /= == != <= >= << >> -> && || ~= ~"),
            vec![
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::StarEqual,
                TokenKind::SlashEqual,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::LessLess,
                TokenKind::GreaterGreater,
                TokenKind::Arrow,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::TildeEqual,
                TokenKind::Tilde,
            ]
        );
    }

    #[test]
    fn test_printed_kinds_lex_back() {
        let fixed = [
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Plus,
            TokenKind::PlusPlus,
            TokenKind::PlusEqual,
            TokenKind::Minus,
            TokenKind::MinusMinus,
            TokenKind::MinusEqual,
            TokenKind::Arrow,
            TokenKind::Star,
            TokenKind::StarEqual,
            TokenKind::Slash,
            TokenKind::SlashEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::LessLess,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::GreaterGreater,
            TokenKind::Equal,
            TokenKind::EqualEqual,
            TokenKind::Bang,
            TokenKind::BangEqual,
            TokenKind::Amp,
            TokenKind::AmpAmp,
            TokenKind::Pipe,
            TokenKind::PipePipe,
            TokenKind::Caret,
            TokenKind::Tilde,
            TokenKind::TildeEqual,
            TokenKind::While,
            TokenKind::Typedef,
            TokenKind::Protected,
            TokenKind::Nil,
        ];

        for kind in fixed {
            let text = kind.lexeme().unwrap();
            assert_eq!(kinds(text), vec![kind], "printed form {text:?}");
        }
    }

    #[test]
    fn test_comments() {
        let stream = lex("let i32 x; // comment\nlet i32 y; /* block\ncomment */ let i32 z;").unwrap();
        let idents: Vec<(String, usize)> = stream
            .tokens()
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| (t.text().unwrap().to_string(), t.line))
            .collect();

        assert_eq!(
            idents,
            vec![
                ("x".to_string(), 1),
                ("y".to_string(), 2),
                ("z".to_string(), 3)
            ]
        );
    }

    #[test]
    fn test_nested_block_comment() {
        assert_eq!(
            kinds("a /* outer /* inner */ still outer */ b"),
            vec![TokenKind::Identifier, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_unterminated_nested_comment() {
        let err = lex("x\n/* outer /* inner */ never closed").unwrap_err();
        assert_eq!(err, LexError::UnterminatedComment { line: 2 });
    }

    #[test]
    fn test_string_literal_is_raw() {
        let stream = lex(r#""hello\nworld""#).unwrap();
        assert_eq!(stream.tokens()[0].kind, TokenKind::String);
        assert_eq!(stream.tokens()[0].text(), Some(r"hello\nworld"));
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let stream = lex("\"a\nb\" x").unwrap();
        assert_eq!(stream.tokens()[0].line, 1);
        assert_eq!(stream.tokens()[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("let str s =\n\"abc").unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { line: 2 });
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_numbers() {
        let stream = lex("42 3.25 7.x").unwrap();
        let tokens = stream.tokens();
        assert_eq!(tokens[0].integer(), Some(42));
        assert_eq!(tokens[0].float(), None);
        assert_eq!(tokens[1].kind, TokenKind::Numeric);
        assert_eq!(tokens[1].float(), Some(3.25));
        assert_eq!(tokens[1].integer(), None);
        assert_eq!(tokens[2].kind, TokenKind::Integer);
        assert_eq!(tokens[3].kind, TokenKind::Dot);
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("class Foo pub public private protected static nil true false u64 double typedef my_var"),
            vec![
                TokenKind::Class,
                TokenKind::Identifier,
                TokenKind::Public,
                TokenKind::Public,
                TokenKind::Private,
                TokenKind::Protected,
                TokenKind::Static,
                TokenKind::Nil,
                TokenKind::True,
                TokenKind::False,
                TokenKind::U64,
                TokenKind::Double,
                TokenKind::Typedef,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("let i32 x = 1;\nx @ 2;").unwrap_err();
        assert_eq!(err, LexError::UnexpectedCharacter { ch: '@', line: 2 });
    }

    #[test]
    fn test_unprocessed_directive_skipped() {
        let stream = lex("#include <io>\nlet i32 x;").unwrap();
        assert_eq!(stream.tokens()[0].kind, TokenKind::Let);
        assert_eq!(stream.tokens()[0].line, 2);
    }

    #[test]
    fn test_indented_directive_skipped() {
        let stream = lex("x;\n  \t#pragma once\ny;").unwrap();
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.tokens()[2].text(), Some("y"));
    }

    #[test]
    fn test_hash_inside_line_is_rejected() {
        let err = lex("let i32 x = 1 # not a directive\n;").unwrap_err();
        assert_eq!(err, LexError::UnexpectedCharacter { ch: '#', line: 1 });

        let err = lex("a # b c").unwrap_err();
        assert_eq!(err, LexError::UnexpectedCharacter { ch: '#', line: 1 });

        let err = lex("/* c */ #define X").unwrap_err();
        assert_eq!(err, LexError::UnexpectedCharacter { ch: '#', line: 1 });
    }

    #[test]
    fn test_integer_overflow() {
        let err = lex("x = 1;\nlet i64 big = 99999999999999999999;").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidNumber {
                text: "99999999999999999999".to_string(),
                line: 2
            }
        );
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_custom_keyword_table() {
        let mut keywords = Keywords::standard();
        keywords.remove("pub");
        let stream = Lexer::new("pub public", &keywords).tokenize().unwrap();
        assert_eq!(stream.tokens()[0].kind, TokenKind::Identifier);
        assert_eq!(stream.tokens()[1].kind, TokenKind::Public);

        // The shared table is untouched.
        assert_eq!(Keywords::shared().lookup("pub"), Some(TokenKind::Public));
    }

    #[test]
    fn test_names_are_total() {
        for &kind in RESERVED {
            assert!(!kind.name().is_empty());
            assert_eq!(Keywords::shared().lookup(kind.lexeme().unwrap()), Some(kind));
        }
        assert_eq!(TokenKind::Eof.name(), "EOF");
        assert_eq!(TokenKind::Eof.lexeme(), None);
    }
}
