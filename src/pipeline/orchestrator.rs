use log::debug;
use std::path::Path;

use crate::error::MergeError;
use crate::pipeline;
use crate::{MergeOpts, MergeSummary};

/// Start walk and sink threads joined by a bounded chunk channel. Caller must pass the
/// handles to [`join_pipeline`].
pub fn run_pipeline(input: &Path, output: &Path, opts: &MergeOpts) -> pipeline::PipelineHandles {
    let pipeline::PipelineChannels {
        chunk_tx,
        chunk_rx,
        first_error,
        ctx,
    } = pipeline::create_pipeline_channels(input, output, opts);

    debug!(
        "pipeline: root {}, chunk {} bytes, channel cap {}",
        ctx.root.display(),
        ctx.chunk_size,
        opts.channel_cap
    );

    let sink_handle =
        pipeline::spawn_sink_thread(chunk_rx, output.to_path_buf(), first_error.clone());
    let walk_handle = pipeline::spawn_walk_thread(chunk_tx, ctx, first_error.clone());

    pipeline::PipelineHandles {
        walk_handle,
        sink_handle,
        first_error,
    }
}

/// Wait for both threads, then return the first error either side recorded, or the summary.
pub fn join_pipeline(handles: pipeline::PipelineHandles) -> Result<MergeSummary, MergeError> {
    let pipeline::PipelineHandles {
        walk_handle,
        sink_handle,
        first_error,
    } = handles;

    // A panicking thread drops its channel end while unwinding, so the peer still finishes.
    let stats = walk_handle.join().unwrap_or_else(|_| {
        first_error.record(MergeError::WorkerPanicked("walk"));
        None
    });
    let written = sink_handle.join().unwrap_or_else(|_| {
        first_error.record(MergeError::WorkerPanicked("sink"));
        None
    });

    pipeline::check_for_first_error(&first_error)?;

    // Both sides report a value whenever no error was recorded.
    let (Some(stats), Some(bytes_written)) = (stats, written) else {
        return Err(MergeError::StreamClosed);
    };
    Ok(MergeSummary {
        files: stats.files,
        headers_stripped: stats.headers_stripped,
        mismatched: stats.mismatched,
        empty_files: stats.empty_files,
        bytes_written,
        header: stats.header,
    })
}

/// Main orchestrator: walk → chunk channel → sink, returning once both ends are closed.
pub fn merge_stream(
    input: &Path,
    output: &Path,
    opts: &MergeOpts,
) -> Result<MergeSummary, MergeError> {
    join_pipeline(run_pipeline(input, output, opts))
}
