//! Pipeline components: walker with header filter, sink writer, coordinator.

pub mod context;
pub mod error_handler;
pub mod header;
pub mod orchestrator;
pub mod sink;
pub mod walk;

pub use context::{
    Chunk, PipelineChannels, PipelineContext, PipelineHandles, create_pipeline_channels,
};
pub use error_handler::{FirstError, check_for_first_error};
pub use header::{HeaderFilter, HeaderMatch, SkipDecision};
pub use orchestrator::{join_pipeline, merge_stream, run_pipeline};
pub use sink::{spawn_sink_thread, write_stream};
pub use walk::{
    WalkOutcome, WalkStats, run_walk_loop, spawn_walk_thread, stream_file, to_outcome_walkdir,
    walkdir_iter,
};
