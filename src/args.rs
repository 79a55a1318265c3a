//! the args for running hatch

use std::path::PathBuf;

use log::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Preprocesses, lexes and parses hatch source files")]
pub struct Args {
    /// Source files to process; each one is handled independently
    #[clap(required = true, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Treat NAME as defined in every file
    #[clap(
        short = 'D',
        long = "define",
        value_name = "NAME",
        env = "HATCH_DEFINES",
        value_delimiter = ','
    )]
    pub defines: Vec<String>,

    /// Dump the token stream instead of parsing
    #[clap(long, conflicts_with = "preprocess_only")]
    pub tokens: bool,

    /// Print the preprocessed text and stop
    #[clap(short = 'E', long)]
    pub preprocess_only: bool,

    /// Write output to this file instead of stdout
    #[clap(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print nothing on success
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise the default log level (-v debug, -vv trace)
    #[clap(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Default filter when `RUST_LOG` is not set
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
