//! Load `.headmerge.toml` (CLI only). Lib callers build [`MergeOpts`] themselves.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::MergeError;
use crate::utils::config::PackagePaths;
use crate::{HeaderMismatchPolicy, MergeOpts};

#[derive(Debug, Default, Deserialize)]
pub struct HeadmergeToml {
    #[serde(default)]
    settings: MergeSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MergeSection {
    follow_links: Option<bool>,
    exclude: Option<Vec<String>>,
    on_mismatch: Option<HeaderMismatchPolicy>,
    chunk_size: Option<usize>,
    channel_cap: Option<usize>,
    max_header_len: Option<usize>,
    verbose: Option<bool>,
}

impl HeadmergeToml {
    pub fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

/// Parse a config file. Errors when it cannot be read or parsed.
pub fn read_headmerge_toml(path: &Path) -> Result<HeadmergeToml, MergeError> {
    let s = std::fs::read_to_string(path).map_err(|e| MergeError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&s).map_err(|e| MergeError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the explicit `--config` path, or `.headmerge.toml` from the working directory when it
/// exists. `Ok(None)` when there is nothing to load.
pub fn load_headmerge_toml(explicit: Option<&Path>) -> Result<Option<HeadmergeToml>, MergeError> {
    if let Some(path) = explicit {
        return read_headmerge_toml(path).map(Some);
    }
    let implicit = PathBuf::from(PackagePaths::get().config_filename());
    if !implicit.is_file() {
        return Ok(None);
    }
    read_headmerge_toml(&implicit).map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $sec.$field.clone() {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI flags.
pub fn apply_file_to_opts(file: &HeadmergeToml, opts: &mut MergeOpts) {
    let sec = &file.settings;
    apply_file_opt!(sec, opts, follow_links);
    apply_file_opt!(sec, opts, exclude);
    apply_file_opt!(sec, opts, on_mismatch);
    apply_file_opt!(sec, opts, chunk_size);
    apply_file_opt!(sec, opts, channel_cap);
    apply_file_opt!(sec, opts, max_header_len);
}
