pub mod config;
pub mod logger;
pub mod merge_toml;

pub use config::*;
pub use logger::{format_log_line, setup_logging};
pub use merge_toml::{apply_file_to_opts, load_headmerge_toml, read_headmerge_toml};
