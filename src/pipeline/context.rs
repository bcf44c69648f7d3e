//! Pipeline context: settings the walk thread owns and the stream wiring between walk and sink.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::engine::tools::canonical_output;
use crate::{HeaderMismatchPolicy, MergeOpts};

use super::error_handler::FirstError;
use super::walk::WalkStats;

/// One piece of the byte stream. Walker is the only sender, sink the only receiver.
pub type Chunk = Vec<u8>;

/// Everything the walk loop needs. Built in `create_pipeline_channels`, moved into the walk
/// thread.
pub struct PipelineContext {
    pub root: PathBuf,
    /// Skipped during the walk so the run never reads its own output.
    pub output_canonical: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub on_mismatch: HeaderMismatchPolicy,
    pub chunk_size: usize,
    pub max_header_len: usize,
    pub progress: bool,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl PipelineContext {
    pub fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline); join both, then read `first_error`.
pub struct PipelineHandles {
    pub walk_handle: JoinHandle<Option<WalkStats>>,
    pub sink_handle: JoinHandle<Option<u64>>,
    pub first_error: FirstError,
}

/// Stream ends plus shared error slot. Walk thread gets `chunk_tx` and `ctx`; sink gets `chunk_rx`.
pub struct PipelineChannels {
    pub chunk_tx: Sender<Chunk>,
    pub chunk_rx: Receiver<Chunk>,
    pub first_error: FirstError,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(input: &Path, output: &Path, opts: &MergeOpts) -> PipelineChannels {
    let (chunk_tx, chunk_rx) = bounded::<Chunk>(opts.channel_cap.max(1));

    // Canonical root so walked paths compare equal to the canonical output path.
    let root = input.canonicalize().unwrap_or_else(|_| input.to_path_buf());

    let ctx = PipelineContext {
        root,
        output_canonical: canonical_output(output),
        exclude: opts.exclude.clone(),
        follow_links: opts.follow_links,
        on_mismatch: opts.on_mismatch,
        chunk_size: opts.chunk_size.max(1),
        max_header_len: opts.max_header_len,
        progress: opts.progress,
        cancel: opts.cancel.clone(),
    };

    PipelineChannels {
        chunk_tx,
        chunk_rx,
        first_error: FirstError::default(),
        ctx,
    }
}
