//! CLI command handler: layer config, install Ctrl+C, run the merge.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::MergeOpts;
use crate::engine::arg_parser::Cli;
use crate::merge_dir;
use crate::utils::{apply_file_to_opts, load_headmerge_toml, setup_logging};

/// Build opts: defaults, then config file, then CLI flags. Initialises logging once the
/// verbosity is known.
fn setup_opts(cli: &Cli) -> Result<MergeOpts> {
    let mut opts = MergeOpts::default();
    // A broken implicit config is only reported, after logging is up.
    let (file, deferred) = match load_headmerge_toml(cli.config.as_deref()) {
        Ok(file) => (file, None),
        Err(e) if cli.config.is_none() => (None, Some(e)),
        Err(e) => return Err(e.into()),
    };
    let mut verbose = false;
    if let Some(file) = &file {
        apply_file_to_opts(file, &mut opts);
        verbose = file.verbose().unwrap_or(verbose);
    }

    verbose = cli.verbose.unwrap_or(verbose);
    if let Some(v) = cli.follow_links {
        opts.follow_links = v;
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    if let Some(policy) = cli.on_mismatch {
        opts.on_mismatch = policy;
    }
    if let Some(size) = cli.chunk_size {
        opts.chunk_size = size;
    }
    opts.progress = verbose;

    setup_logging(verbose);
    if let Some(e) = deferred {
        warn!("ignoring {}", e);
    }
    Ok(opts)
}

/// Install a Ctrl+C handler that flips the returned flag; the walker polls it between chunks.
fn install_cancel_handler() -> Result<Arc<AtomicBool>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;
    Ok(cancel)
}

/// Merge `cli.input` into `cli.output`.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let mut opts = setup_opts(cli)?;
    debug!("{} CONFIG: {:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);

    info!("Reading: {}", cli.input.display());
    info!("Writing: {}", cli.output.display());
    opts.cancel = Some(install_cancel_handler()?);

    let summary = merge_dir(&cli.input, &cli.output, &opts).with_context(|| {
        format!(
            "merge {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    if !summary.mismatched.is_empty() {
        info!(
            "{} file(s) had a different first line; kept as data",
            summary.mismatched.len()
        );
    }
    info!(
        "done! {} files, {} headers stripped, {} bytes written",
        summary.files, summary.headers_stripped, summary.bytes_written
    );
    Ok(())
}
