//! Engine module: CLI surface, progress and path helpers

pub mod arg_parser;
pub mod cli;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use tools::{
    canonical_output, count_line_terminator, glob_match, remove_existing_output,
    should_include_in_walk, trim_line_end,
};
