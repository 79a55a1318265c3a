//! # Introduction
//!
//! hatch is the front end of a small C-like language. It turns raw source
//! text into a validated abstract syntax tree that a later stage could
//! type-check or compile; nothing past the tree is in scope.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Preprocessor → Lexer → Token Stream → Parser → AST
//! ```
//!
//! 1. [`preprocess`]: `#define` substitution and `#ifdef`/`#ifndef`
//!    conditional compilation, preserving line numbers.
//! 2. [`parser::lexer`]: tokenises the text against a reserved-word table.
//! 3. [`parser::parse`]: recursive descent over the tokens, producing a
//!    [`parser::ast::Program`].
//! 4. [`parser::visitor`] / [`parser::printer`]: traversal protocol and an
//!    S-expression printer built on it.
//! 5. [`frontend`]: [`build_tree`] wires the stages together.
//!
//! ## Example
//!
//! ```
//! use hatch::{build_tree, Config};
//!
//! let program = build_tree("fun i32 main() { return 1 + 2; }", &Config::default()).unwrap();
//! assert_eq!(program.declarations.len(), 1);
//! ```

pub mod frontend;
pub mod parser;
pub mod preprocess;

pub use frontend::{build_tree, Config, FrontendError};
