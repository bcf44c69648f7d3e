//! Headmerge: merge a directory tree of delimited text files into one file with a single header.
//!
//! Files are visited depth-first in file-name order. The first line of the first non-empty file
//! becomes the header; later files that start with the same line have it (and its line
//! terminator) skipped. Everything else is copied byte for byte through a bounded channel from
//! a walker thread to a writer thread, so no file is ever held in memory whole.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::{InputOp, MergeError, MergeErrorKind};
pub use types::*;

use log::debug;
use std::path::Path;

/// Result alias used by the public headmerge API
pub type Result<T> = std::result::Result<T, MergeError>;

/// Merge every regular file under `input` into `output`.
///
/// An existing file at `output` is removed first, so repeated runs overwrite instead of
/// appending. On failure the partially written output is left in place.
///
/// ```ignore
/// let opts = MergeOpts::default();
/// let summary = headmerge::merge_dir(Path::new("exports"), Path::new("all.csv"), &opts)?;
/// println!("{} files, {} headers stripped", summary.files, summary.headers_stripped);
/// ```
pub fn merge_dir(input: &Path, output: &Path, opts: &MergeOpts) -> Result<MergeSummary> {
    if engine::tools::remove_existing_output(output)? {
        debug!("removed previous output {}", output.display());
    }
    let summary = pipeline::merge_stream(input, output, opts)?;
    debug!("{:?}", summary);
    Ok(summary)
}
