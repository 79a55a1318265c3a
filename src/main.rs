// hatch: preprocessor, lexer and parser driver

mod args;

use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use env_logger::Env;

use hatch::parser::lexer::Lexer;
use hatch::parser::printer::print_program;
use hatch::{build_tree, frontend, Config, FrontendError};

use args::Args;

/// What to produce for each file
#[derive(Debug, Clone, Copy)]
enum Mode {
    Preprocess,
    Tokens,
    Tree,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();
    let filter = args.log_level_filter();
    env_logger::Builder::from_env(Env::default().default_filter_or(filter.as_str())).init();
    log::trace!("starting hatch with args: {args:?}");

    let config = Config::new(args.defines.iter().cloned().collect());
    log::debug!("{} predefined macros", config.predefined.len());

    let mode = if args.preprocess_only {
        Mode::Preprocess
    } else if args.tokens {
        Mode::Tokens
    } else {
        Mode::Tree
    };

    let mut output = String::new();
    let mut failures = 0usize;

    for path in &args.files {
        match process_file(path, mode, &config) {
            Ok(text) => output.push_str(&text),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }

    if !args.quiet {
        match &args.output {
            Some(out_path) => fs::write(out_path, &output)?,
            None => print!("{output}"),
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} files failed", args.files.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn process_file(path: &Path, mode: Mode, config: &Config) -> Result<String, Box<dyn Error>> {
    let source = fs::read_to_string(path)?;
    log::debug!("processing {} ({} bytes)", path.display(), source.len());

    let text = match mode {
        Mode::Preprocess => frontend::preprocess(&source, config)?,
        Mode::Tokens => {
            let preprocessed = frontend::preprocess(&source, config)?;
            let stream = Lexer::new(&preprocessed, config.keywords)
                .tokenize()
                .map_err(FrontendError::from)?;
            let mut out = String::new();
            for token in stream.tokens() {
                writeln!(out, "{:>4} {}", token.line, token)?;
            }
            out
        }
        Mode::Tree => print_program(&build_tree(&source, config)?),
    };

    Ok(text)
}
