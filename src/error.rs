//! Structured errors for a merge run.

use std::io;
use std::path::PathBuf;

/// Which input operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOp {
    Open,
    Seek,
    Read,
}

impl std::fmt::Display for InputOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InputOp::Open => "open",
            InputOp::Seek => "seek",
            InputOp::Read => "read",
        };
        f.write_str(s)
    }
}

/// Coarse error class, for callers that only need to branch on where a run failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeErrorKind {
    /// Could not walk the input tree.
    Traversal,
    /// Open/seek/read on an input file, or its first line was rejected.
    InputIo,
    /// Could not remove, create, or write the output file.
    Output,
    /// The stream between walker and sink was torn down, or a worker died.
    Coordination,
    /// Config file could not be loaded.
    Config,
}

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("walk failed{}: {source}", display_opt_path(.path))]
    Walk {
        path: Option<PathBuf>,
        #[source]
        source: walkdir::Error,
    },

    #[error("{op} {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        op: InputOp,
        #[source]
        source: io::Error,
    },

    #[error("first line of {} exceeds {limit} bytes", .path.display())]
    HeaderTooLong { path: PathBuf, limit: usize },

    #[error("first line of {} does not match the header", .path.display())]
    HeaderMismatch { path: PathBuf },

    #[error("output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("byte stream closed before the walk finished")]
    StreamClosed,

    #[error("merge cancelled")]
    Cancelled,

    #[error("{0} thread panicked")]
    WorkerPanicked(&'static str),

    #[error("config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

fn display_opt_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

impl MergeError {
    pub fn kind(&self) -> MergeErrorKind {
        match self {
            MergeError::Walk { .. } => MergeErrorKind::Traversal,
            MergeError::Input { .. }
            | MergeError::HeaderTooLong { .. }
            | MergeError::HeaderMismatch { .. } => MergeErrorKind::InputIo,
            MergeError::Output { .. } => MergeErrorKind::Output,
            MergeError::StreamClosed | MergeError::Cancelled | MergeError::WorkerPanicked(_) => {
                MergeErrorKind::Coordination
            }
            MergeError::Config { .. } => MergeErrorKind::Config,
        }
    }

    pub(crate) fn input(path: impl Into<PathBuf>, op: InputOp, source: io::Error) -> Self {
        MergeError::Input {
            path: path.into(),
            op,
            source,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MergeError::Output {
            path: path.into(),
            source,
        }
    }
}
