//! Configuration management for the control center.
//!
//! This module provides:
//! - TOML-based configuration with `[paths]`, `[server]` and `[logging]` sections
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use pcc_core::config::ConfigManager;
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(ConfigManager::default_path());
//! config.load_or_create().unwrap();
//! config.ensure_dirs_exist().unwrap();
//!
//! println!("Topic queue: {}", config.topic_queue_path().display());
//! println!("Listening on port {}", config.settings().server.port);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, LoggingSettings, PathSettings, ServerSettings, Settings};
