//! Application configuration constants.
//! Tuning and limits in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Config file looked up in the working directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Byte stream ----

/// Sizing for the walker → sink stream.
pub struct StreamConsts;

impl StreamConsts {
    /// Bytes read from an input file per chunk. 64 KB.
    pub const CHUNK_SIZE: usize = 64 * 1024;
    /// Chunks in flight before the walker blocks (backpressure). 16 × 64 KB = 1 MB.
    pub const CHANNEL_CAP: usize = 16;
    /// Output write buffer. 256 KB.
    pub const WRITE_BUFFER: usize = 256 * 1024;
}

// ---- Header detection ----

pub struct HeaderConsts;

impl HeaderConsts {
    /// Terminator bytes (`\r`, `\n`) skipped after a matched header.
    pub const MAX_TERMINATOR_BYTES: usize = 2;
    /// Longest first line scanned for a header. 64 KB.
    pub const MAX_HEADER_LEN: usize = 64 * 1024;
}

// ---- Progress ----

pub struct ProgressConsts;

impl ProgressConsts {
    pub const COUNTER_DESC: &'static str = "Merging";
}
