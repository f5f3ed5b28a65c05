//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to stderr by default. When a log directory is given they go to a
//! daily rotating file there instead, which suits running from a git hook or
//! a service where stderr is discarded.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "gitjira=info,warn";

/// File name prefix of rotated log files.
const LOG_FILE_PREFIX: &str = "gitjira.log";

/// Initialize the logging system.
///
/// Log levels are configured via `RUST_LOG`:
/// - `RUST_LOG=gitjira=debug` - request-level details
/// - `RUST_LOG=debug` - also logs from reqwest and hyper
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the tracing
/// subscriber cannot be set.
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<()> {
    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);

            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(env_filter());
            tracing::subscriber::set_global_default(subscriber)?;
            tracing::debug!(log_dir = %dir.display(), "Log directory");
        }
        None => {
            let subscriber = tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .with(env_filter());
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gitjira starting up");
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// The path a log file for today would have in `dir`, ignoring rotation suffixes.
pub fn log_file_prefix(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_PREFIX)
}
