//! Whole-pipeline entry point: preprocess, lex, parse.

use crate::parser::ast::Program;
use crate::parser::lexer::{Keywords, LexError, Lexer};
use crate::parser::parse::{ParseError, Parser};
use crate::preprocess::{PredefinedMacros, PreprocessError, Preprocessor};

/// Settings shared by every file of one run
#[derive(Debug, Clone)]
pub struct Config {
    pub predefined: PredefinedMacros,
    pub keywords: &'static Keywords,
}

impl Config {
    pub fn new(predefined: PredefinedMacros) -> Self {
        Self {
            predefined,
            keywords: Keywords::shared(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PredefinedMacros::new())
    }
}

/// The single error a failed unit produces, from whichever stage failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrontendError {
    #[error("Preprocessor error: {0}")]
    Preprocess(#[from] PreprocessError),

    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn line(&self) -> usize {
        match self {
            FrontendError::Preprocess(e) => e.line(),
            FrontendError::Lex(e) => e.line(),
            FrontendError::Parse(e) => e.line,
        }
    }
}

/// Run the preprocessor over `source`.
pub fn preprocess(source: &str, config: &Config) -> Result<String, FrontendError> {
    Ok(Preprocessor::new(&config.predefined).process(source)?)
}

/// Turn raw source text into a program tree.
pub fn build_tree(source: &str, config: &Config) -> Result<Program, FrontendError> {
    let text = preprocess(source, config)?;
    let stream = Lexer::new(&text, config.keywords).tokenize()?;
    log::debug!("lexed {} tokens", stream.len());

    let mut parser = Parser::from_stream(stream);
    Ok(parser.parse_program()?)
}
