//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.

use serde::{Deserialize, Serialize};

use crate::logging::{LogLevel, DEFAULT_CAPACITY, DEFAULT_TAIL};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// File locations. Relative paths resolve against the config file's folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// The durable topic queue document.
    #[serde(default = "default_topic_queue_file")]
    pub topic_queue_file: String,

    /// Folder for rolling log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Folder the production workers write finished media to.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Dashboard page served at `/`.
    #[serde(default = "default_dashboard_file")]
    pub dashboard_file: String,
}

fn default_topic_queue_file() -> String {
    "topic_queue.json".to_string()
}

fn default_logs_folder() -> String {
    "logs".to_string()
}

fn default_output_folder() -> String {
    "../output".to_string()
}

fn default_dashboard_file() -> String {
    "control_center.html".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            topic_queue_file: default_topic_queue_file(),
            logs_folder: default_logs_folder(),
            output_folder: default_output_folder(),
            dashboard_file: default_dashboard_file(),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin.
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Console filter level when RUST_LOG is unset.
    #[serde(default)]
    pub level: LogLevel,

    /// Number of events kept for the dashboard.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Events returned by a log query without an explicit limit.
    #[serde(default = "default_tail")]
    pub default_tail: usize,

    /// Also write console output to a daily file in the logs folder.
    #[serde(default = "default_true")]
    pub file_output: bool,
}

fn default_buffer_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_tail() -> usize {
    DEFAULT_TAIL
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            buffer_capacity: default_buffer_capacity(),
            default_tail: default_tail(),
            file_output: true,
        }
    }
}

/// Names of config sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Server,
    Logging,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 3] = [Self::Paths, Self::Server, Self::Logging];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Server => "server",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section in generated files.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "File locations (relative paths resolve against this file)",
            ConfigSection::Server => "HTTP listener",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
