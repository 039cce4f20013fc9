//! Bounded event log shared by every component.
//!
//! Entries are kept oldest-first. Once the buffer is full, each append
//! evicts from the head so only the most recent `capacity` entries remain.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::types::{LogConfig, LogEntry, LogKind, LogLevel};
use crate::clock;

/// Ring buffer of timestamped events.
///
/// Cloning is cheap and yields a handle to the same buffer.
#[derive(Clone)]
pub struct EventLog {
    /// Entries in chronological order.
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    config: LogConfig,
}

impl EventLog {
    pub fn new(config: LogConfig) -> Self {
        let config = LogConfig {
            capacity: config.capacity.max(1),
            ..config
        };
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(config.capacity))),
            config,
        }
    }

    /// Event log with the given capacity and console mirroring enabled.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(LogConfig {
            capacity,
            ..LogConfig::default()
        })
    }

    /// Append an entry stamped with the current local time.
    pub fn append(&self, message: impl Into<String>, kind: LogKind) -> LogEntry {
        let entry = LogEntry {
            timestamp: clock::time_of_day(),
            kind,
            message: message.into(),
        };

        {
            let mut entries = self.entries.lock();
            entries.push_back(entry.clone());
            while entries.len() > self.config.capacity {
                entries.pop_front();
            }
        }

        if self.config.mirror_to_tracing {
            mirror(&entry);
        }

        entry
    }

    pub fn info(&self, message: impl Into<String>) -> LogEntry {
        self.append(message, LogKind::Info)
    }

    pub fn success(&self, message: impl Into<String>) -> LogEntry {
        self.append(message, LogKind::Success)
    }

    pub fn warn(&self, message: impl Into<String>) -> LogEntry {
        self.append(message, LogKind::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> LogEntry {
        self.append(message, LogKind::Error)
    }

    /// The most recent `limit` entries, oldest first.
    pub fn tail(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    /// Drop every entry, then record that the log was cleared.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.info("Logs cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("len", &self.len())
            .field("capacity", &self.config.capacity)
            .finish()
    }
}

fn mirror(entry: &LogEntry) {
    let kind = entry.kind.as_str().to_uppercase();
    match entry.kind.mirror_level() {
        LogLevel::Error => {
            tracing::error!(target: "pcc::events", "[{}] [{}] {}", entry.timestamp, kind, entry.message)
        }
        LogLevel::Warn => {
            tracing::warn!(target: "pcc::events", "[{}] [{}] {}", entry.timestamp, kind, entry.message)
        }
        _ => tracing::info!(target: "pcc::events", "[{}] [{}] {}", entry.timestamp, kind, entry.message),
    }
}
