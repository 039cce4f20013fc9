//! Logging infrastructure for the control center.
//!
//! This module provides:
//! - `EventLog`: bounded in-memory log shown on the dashboard
//! - Console mirroring of every event through `tracing`
//! - Global subscriber setup with an optional rolling log file
//!
//! # Example
//!
//! ```
//! use pcc_core::logging::{EventLog, LogConfig, LogKind};
//!
//! let log = EventLog::new(LogConfig::default());
//! log.info("Backend API starting...");
//! log.append("Render farm online", LogKind::from("worker"));
//!
//! let recent = log.tail(100);
//! assert_eq!(recent.len(), 2);
//! ```

mod event_log;
mod types;

pub use event_log::EventLog;
pub use types::{LogConfig, LogEntry, LogKind, LogLevel};

use std::path::Path;

use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default number of entries kept by the event log.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default number of entries returned by a tail query.
pub const DEFAULT_TAIL: usize = 100;

/// File name prefix for the rolling log file.
const LOG_FILE_PREFIX: &str = "control-center.log";

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
/// - Also writes to a daily rolling file when `log_dir` is given
///
/// Should be called once at application startup. Keep the returned guard
/// alive for as long as file output is wanted.
pub fn init_tracing(default_level: LogLevel, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

/// Stderr-only dispatcher for startup work that runs before the config is
/// read and [`init_tracing`] can be called.
///
/// Use with [`tracing::dispatcher::with_default`].
pub fn bootstrap_dispatch() -> Dispatch {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(LogLevel::Info)));
    dispatch_with(filter)
}

fn dispatch_with(filter: EnvFilter) -> Dispatch {
    Dispatch::new(
        fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .finish(),
    )
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
