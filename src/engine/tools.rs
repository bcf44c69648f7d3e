//! Path, filter and byte helpers

use log::info;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::MergeError;
use crate::utils::config::HeaderConsts;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Count leading line-terminator bytes (`\r`, `\n`) in `bytes`, stopping at the first other
/// byte and never counting more than [`HeaderConsts::MAX_TERMINATOR_BYTES`].
pub fn count_line_terminator(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take(HeaderConsts::MAX_TERMINATOR_BYTES)
        .take_while(|&&b| b == CR || b == LF)
        .count()
}

/// Strip one trailing `\n`, then one trailing `\r`.
pub fn trim_line_end(line: &mut Vec<u8>) {
    if line.last() == Some(&LF) {
        line.pop();
    }
    if line.last() == Some(&CR) {
        line.pop();
    }
}

/// Returns true if the walked file should be merged (not excluded).
pub fn should_include_in_walk(
    path: &Path,
    output_canonical: &Option<PathBuf>,
    exclude_patterns: &[String],
) -> bool {
    if let Some(out) = output_canonical
        && path == out.as_path()
    {
        return false;
    }
    if exclude_patterns.is_empty() {
        return true;
    }
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return true,
    };
    let path_str = path.to_str().unwrap_or("");
    !exclude_patterns
        .iter()
        .any(|pattern| glob_match(pattern, name) || glob_match(pattern, path_str))
}

/// Simple glob pattern matching (supports * and ?)
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    glob_match_chars(&pattern, &text)
}

fn glob_match_chars(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('*', rest)) => {
            if rest.is_empty() {
                return true; // trailing * matches everything
            }
            (0..=text.len()).any(|i| glob_match_chars(rest, &text[i..]))
        }
        Some(('?', rest)) => !text.is_empty() && glob_match_chars(rest, &text[1..]),
        Some((p, rest)) => text.first() == Some(p) && glob_match_chars(rest, &text[1..]),
    }
}

/// Canonical form of `output` if it (or its parent) exists, so the walk can skip it even
/// before the sink has created it.
pub fn canonical_output(output: &Path) -> Option<PathBuf> {
    if let Ok(p) = output.canonicalize() {
        return Some(p);
    }
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Delete a pre-existing output file so the run overwrites instead of appending.
/// Returns true when a file was removed.
pub fn remove_existing_output(output: &Path) -> Result<bool, MergeError> {
    match std::fs::symlink_metadata(output) {
        Ok(meta) if meta.is_dir() => Err(MergeError::output(
            output,
            std::io::Error::new(ErrorKind::IsADirectory, "output path is a directory"),
        )),
        Ok(_) => {
            info!("Output exists, removing {}", output.display());
            std::fs::remove_file(output).map_err(|e| MergeError::output(output, e))?;
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(MergeError::output(output, e)),
    }
}
