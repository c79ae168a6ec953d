//! Driver configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Counts the ways a digit message (A=1 .. Z=26) can be decoded into letters.
#[derive(Parser, Debug)]
#[command(name = "decode-combinations", version, about)]
pub struct CliConfig {
    /// Files holding one digit message each. Reads standard input when none are given.
    pub files: Vec<PathBuf>,

    /// Backend used to count the inputs.
    #[arg(long, value_enum, default_value_t = Strategy::Sequential, env = "DECODE_STRATEGY")]
    pub strategy: Strategy,

    /// Worker threads (rayon, kanal) or concurrent tasks (tokio).
    #[arg(short, long, default_value_t = 4, env = "DECODE_JOBS")]
    pub jobs: usize,

    /// Count the raw bytes without stripping a trailing line terminator.
    #[arg(long)]
    pub strict: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// How a batch of inputs is spread over threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Sequential,
    Rayon,
    Kanal,
    Tokio,
}

impl CliConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
