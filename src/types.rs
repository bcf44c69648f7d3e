//! Public types for the headmerge API and pipeline.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::utils::config::{HeaderConsts, StreamConsts};

/// What to do when a later file's first line differs from the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMismatchPolicy {
    /// Keep the line as data (logged at debug level).
    #[default]
    Keep,
    /// Keep the line as data and log a warning.
    Warn,
    /// Abort the run.
    Error,
}

/// Options for [`merge_dir`](crate::merge_dir).
#[derive(Clone, Debug)]
pub struct MergeOpts {
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax, e.g. `*.bak`), matched on file name and full path.
    pub exclude: Vec<String>,
    pub on_mismatch: HeaderMismatchPolicy,
    /// Bytes per chunk sent through the stream.
    pub chunk_size: usize,
    /// Chunks the stream buffers before the walker blocks.
    pub channel_cap: usize,
    /// Longest first line accepted when looking for the header.
    pub max_header_len: usize,
    /// Show a file counter while walking.
    pub progress: bool,
    /// Set to true from another thread (e.g. a Ctrl+C handler) to abort the run.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for MergeOpts {
    fn default() -> Self {
        Self {
            follow_links: false,
            exclude: Vec::new(),
            on_mismatch: HeaderMismatchPolicy::default(),
            chunk_size: StreamConsts::CHUNK_SIZE,
            channel_cap: StreamConsts::CHANNEL_CAP,
            max_header_len: HeaderConsts::MAX_HEADER_LEN,
            progress: false,
            cancel: None,
        }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Regular files streamed (including empty ones).
    pub files: usize,
    /// Files whose leading header was skipped.
    pub headers_stripped: usize,
    /// Files whose first line differed from the header and was kept as data.
    pub mismatched: Vec<PathBuf>,
    /// Zero-byte files.
    pub empty_files: usize,
    pub bytes_written: u64,
    /// The canonical header, without its terminator. `None` when no non-empty file was seen.
    pub header: Option<Vec<u8>>,
}
