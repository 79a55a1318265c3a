//! hatch source parser
//!
//! This module transforms preprocessed hatch source text into an Abstract
//! Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`stream`]: Cursor over the token list shared by all parsing functions
//! - [`parse`]: Parser struct, error types and the program loop
//! - [`ast`]: AST node definitions
//! - [`visitor`]: Generic traversal protocol over the AST
//! - [`printer`]: S-expression rendering built on the visitor
//!
//! # Language
//!
//! - Types: `u8`..`u64`, `i8`..`i64`, `float`, `double`, `str`, `void`,
//!   named types, pointers (`*T`, `T*`) and fixed arrays (`T[N]`)
//! - Declarations: `let`, `fun` (definitions and prototypes), `class`, `typedef`
//! - Statements: `if`/`else`, `for`, `while`, `do`-`while`, `return`,
//!   `break`, `continue`, blocks, expression statements
//! - Expressions: assignment, logical, bitwise, relational, shifts,
//!   arithmetic, member access, prefix/postfix unary, calls, subscripts
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod printer;
pub mod stream;
pub mod visitor;

mod declarations;
mod expressions;
mod statements;
mod types;
