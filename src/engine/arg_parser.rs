use clap::Parser;
use std::path::PathBuf;

use crate::HeaderMismatchPolicy;

/// Merge every file under a directory into one output, keeping a single header line.
#[derive(Clone, Debug, Parser)]
#[command(name = "headmerge")]
#[command(about = "Merge delimited files under DIR into one file with a single header.")]
pub struct Cli {
    /// Input directory, walked recursively in file-name order.
    #[arg(long, short, value_name = "DIR")]
    pub input: PathBuf,

    /// Output file. An existing file at this path is removed first.
    #[arg(long, short, value_name = "FILE")]
    pub output: PathBuf,

    /// Verbose output (debug logging and a file counter).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Follow symbolic links while walking.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e '*.bak' '*.tmp'
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// What to do when a file's first line differs from the header.
    #[arg(long, value_enum)]
    pub on_mismatch: Option<HeaderMismatchPolicy>,

    /// Bytes per chunk streamed from input to output.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub chunk_size: Option<usize>,

    /// Config file. Default: `.headmerge.toml` in the working directory, if present.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,
}
