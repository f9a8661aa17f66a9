//! Tracing setup shared by the binaries.
//!
//! The player and stamper draw on the alternate screen, so logs go to a file in the
//! platform data directory. Filtering follows `RUST_LOG`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::constants::logging::{APP_DIR, LOG_FILE};

/// Directory holding the log file, if the platform has a data directory.
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR))
}

/// Install the global subscriber. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init() -> WorkerGuard {
    let dir = log_dir().filter(|d| fs_err::create_dir_all(d).is_ok());

    let (writer, guard) = match dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE)),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    guard
}
