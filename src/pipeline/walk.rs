//! Walk loop: visits every regular file under the root in name order, skips matched headers,
//! and streams the rest of each file into the chunk channel.

use crossbeam_channel::Sender;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::HeaderMismatchPolicy;
use crate::engine::progress::{
    ProgressBar, finish_progress, setup_progress, update_progress_bar,
};
use crate::engine::tools::should_include_in_walk;
use crate::error::{InputOp, MergeError};
use crate::utils::config::ProgressConsts;

use super::context::{Chunk, PipelineContext};
use super::error_handler::FirstError;
use super::header::{HeaderFilter, HeaderMatch};

/// One result from the directory walk: a file to merge or a traversal error.
pub enum WalkOutcome {
    File(PathBuf),
    Err(MergeError),
}

/// Convert a walkdir result into [`WalkOutcome`]. Directories (and symlinks to them) yield `None`.
/// A symlink whose target cannot be stat'd (e.g. dangling) is an open error.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> Option<WalkOutcome> {
    match r {
        Ok(entry) => {
            let ft = entry.file_type();
            if ft.is_file() {
                return Some(WalkOutcome::File(entry.into_path()));
            }
            if !ft.is_symlink() {
                return None;
            }
            match entry.path().metadata() {
                Ok(meta) => meta
                    .is_file()
                    .then(|| WalkOutcome::File(entry.into_path())),
                Err(e) => Some(WalkOutcome::Err(MergeError::input(
                    entry.path(),
                    InputOp::Open,
                    e,
                ))),
            }
        }
        Err(err) => Some(WalkOutcome::Err(MergeError::Walk {
            path: err.path().map(PathBuf::from),
            source: err,
        })),
    }
}

/// Lazy depth-first walk in file-name order, files only.
pub fn walkdir_iter(
    root: &Path,
    follow_links: bool,
) -> impl Iterator<Item = WalkOutcome> + use<> {
    walkdir::WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(to_outcome_walkdir)
}

/// Counters gathered by the walk, returned to the coordinator.
#[derive(Debug, Default)]
pub struct WalkStats {
    pub files: usize,
    pub headers_stripped: usize,
    pub mismatched: Vec<PathBuf>,
    pub empty_files: usize,
    pub header: Option<Vec<u8>>,
}

pub fn spawn_walk_thread(
    chunk_tx: Sender<Chunk>,
    ctx: PipelineContext,
    first_error: FirstError,
) -> JoinHandle<Option<WalkStats>> {
    thread::spawn(move || {
        let iter = walkdir_iter(&ctx.root, ctx.follow_links);
        let result = run_walk_loop(&chunk_tx, &ctx, iter);
        // Record before the sender drops so a peer failure caused by the hang-up never wins.
        let stats = first_error.capture(result);
        drop(chunk_tx);
        stats
    })
}

/// Consume `iter`, stream every included file into `chunk_tx`. Stops at the first error.
pub fn run_walk_loop<I>(
    chunk_tx: &Sender<Chunk>,
    ctx: &PipelineContext,
    iter: I,
) -> Result<WalkStats, MergeError>
where
    I: Iterator<Item = WalkOutcome>,
{
    let filter = HeaderFilter::new(ctx.max_header_len);
    let bar = setup_progress(ctx.progress, ProgressConsts::COUNTER_DESC);
    let mut stats = WalkStats::default();

    let result = walk_files(chunk_tx, ctx, iter, &filter, bar.as_ref(), &mut stats);
    finish_progress(&bar);
    result?;
    stats.header = filter.into_header();
    debug!(
        "walk done: {} files, {} headers stripped",
        stats.files, stats.headers_stripped
    );
    Ok(stats)
}

fn walk_files<I>(
    chunk_tx: &Sender<Chunk>,
    ctx: &PipelineContext,
    iter: I,
    filter: &HeaderFilter,
    bar: Option<&ProgressBar>,
    stats: &mut WalkStats,
) -> Result<(), MergeError>
where
    I: Iterator<Item = WalkOutcome>,
{
    for outcome in iter {
        let path = match outcome {
            WalkOutcome::File(path) => path,
            WalkOutcome::Err(err) => return Err(err),
        };
        if !should_include_in_walk(&path, &ctx.output_canonical, &ctx.exclude) {
            debug!("excluded {}", path.display());
            continue;
        }
        if ctx.cancelled() {
            return Err(MergeError::Cancelled);
        }
        merge_file(&path, filter, chunk_tx, ctx, stats)?;
        if let Some(bar) = bar {
            update_progress_bar(bar, 1);
        }
    }
    Ok(())
}

/// Open one file, position past its header if it repeats, and stream the rest.
/// The file is closed when this returns, on every path.
fn merge_file(
    path: &Path,
    filter: &HeaderFilter,
    chunk_tx: &Sender<Chunk>,
    ctx: &PipelineContext,
    stats: &mut WalkStats,
) -> Result<(), MergeError> {
    let file = File::open(path).map_err(|e| MergeError::input(path, InputOp::Open, e))?;
    let mut reader = BufReader::new(file);
    stats.files += 1;

    let decision = filter.position(&mut reader, path)?;
    match decision.kind {
        HeaderMatch::Empty => stats.empty_files += 1,
        HeaderMatch::Established => debug!("header taken from {}", path.display()),
        HeaderMatch::Matched => stats.headers_stripped += 1,
        HeaderMatch::Differs => {
            match ctx.on_mismatch {
                HeaderMismatchPolicy::Keep => {
                    debug!("first line of {} differs from header", path.display())
                }
                HeaderMismatchPolicy::Warn => warn!(
                    "first line of {} differs from header; kept as data",
                    path.display()
                ),
                HeaderMismatchPolicy::Error => {
                    return Err(MergeError::HeaderMismatch {
                        path: path.to_path_buf(),
                    });
                }
            }
            stats.mismatched.push(path.to_path_buf());
        }
    }

    let sent = stream_file(&mut reader, path, chunk_tx, ctx)?;
    debug!(
        "{}: skipped {} bytes, streamed {} bytes",
        path.display(),
        decision.offset,
        sent
    );
    Ok(())
}

/// Copy `reader` to end of file into the channel, `ctx.chunk_size` bytes at a time.
/// Blocks while the channel is full; fails with `StreamClosed` once the sink has gone.
pub fn stream_file<R: Read>(
    reader: &mut R,
    path: &Path,
    chunk_tx: &Sender<Chunk>,
    ctx: &PipelineContext,
) -> Result<u64, MergeError> {
    let mut sent = 0_u64;
    loop {
        if ctx.cancelled() {
            return Err(MergeError::Cancelled);
        }
        let mut chunk = vec![0_u8; ctx.chunk_size];
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(MergeError::input(path, InputOp::Read, e)),
        };
        chunk.truncate(n);
        chunk_tx.send(chunk).map_err(|_| MergeError::StreamClosed)?;
        sent += n as u64;
    }
    Ok(sent)
}
