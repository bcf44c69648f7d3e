//! Sink writer: drains the chunk channel into the output file in arrival order.

use crossbeam_channel::Receiver;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::error::MergeError;
use crate::utils::config::StreamConsts;

use super::context::Chunk;
use super::error_handler::FirstError;

pub fn spawn_sink_thread(
    chunk_rx: Receiver<Chunk>,
    output: PathBuf,
    first_error: FirstError,
) -> JoinHandle<Option<u64>> {
    thread::spawn(move || {
        let result = write_stream(&chunk_rx, &output);
        // Record before the receiver drops; the walker's failed send must not win.
        let written = first_error.capture(result);
        drop(chunk_rx);
        written
    })
}

/// Create (or truncate) `output`, then write every chunk until all senders are gone.
/// Returns bytes written. The file is closed on return, success or not.
pub fn write_stream(chunk_rx: &Receiver<Chunk>, output: &Path) -> Result<u64, MergeError> {
    let file = File::create(output).map_err(|e| MergeError::output(output, e))?;
    let mut writer = BufWriter::with_capacity(StreamConsts::WRITE_BUFFER, file);
    let mut written = 0_u64;
    for chunk in chunk_rx.iter() {
        writer
            .write_all(&chunk)
            .map_err(|e| MergeError::output(output, e))?;
        written += chunk.len() as u64;
    }
    writer.flush().map_err(|e| MergeError::output(output, e))?;
    debug!("sink: stream ended, {} bytes to {}", written, output.display());
    Ok(written)
}
