//! Logging types and configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Log level for filtering `tracing` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information.
    Debug,
    /// General information.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

/// Type of an event log entry.
///
/// The dashboard colours entries by type. Workers may post their own types,
/// so anything outside the known set is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Other(String),
}

impl LogKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }

    /// Level the entry is mirrored at on the console.
    pub fn mirror_level(&self) -> LogLevel {
        match self {
            Self::Error => LogLevel::Error,
            Self::Warning => LogLevel::Warn,
            _ => LogLevel::Info,
        }
    }
}

impl From<String> for LogKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for LogKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<LogKind> for String {
    fn from(kind: LogKind) -> Self {
        match kind {
            LogKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timestamped event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
}

/// Configuration for the event log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum number of entries kept; older entries are evicted first.
    pub capacity: usize,
    /// Mirror every entry to `tracing`.
    pub mirror_to_tracing: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            capacity: super::DEFAULT_CAPACITY,
            mirror_to_tracing: true,
        }
    }
}
