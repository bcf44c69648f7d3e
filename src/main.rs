//! Headmerge CLI: merge files under --input into --output with a single header line.

use anyhow::Result;
use clap::Parser;
use headmerge::engine::arg_parser::Cli;
use headmerge::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
