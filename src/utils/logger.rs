use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// One log line. Warnings and errors always carry level and target; with `verbose` so do
/// debug/info lines, which makes the walker and sink threads distinguishable.
pub fn format_log_line(level: Level, target: &str, message: &str, verbose: bool) -> String {
    let name = env!("CARGO_PKG_NAME").cyan();
    let level_str = match level {
        Level::Error => "ERROR".red(),
        Level::Warn => "WARN".yellow(),
        Level::Info => "INFO".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".normal(),
    };
    let tagged = matches!(level, Level::Error | Level::Warn) || verbose;
    if tagged {
        format!("[{} {} {}] {}", name, level_str, target.white(), message)
    } else {
        format!("[{}] {}", name, message)
    }
}

/// Initialise the global logger. Call once, from the binary.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let result = Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(move |buf, record| {
            let line = format_log_line(
                record.level(),
                record.target(),
                &record.args().to_string(),
                verbose,
            );
            writeln!(buf, "{}", line)
        })
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialised");
    }
}
