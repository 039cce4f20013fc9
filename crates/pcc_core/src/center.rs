//! The shared state container handed to every request.

use std::path::PathBuf;

use crate::config::ConfigManager;
use crate::logging::{EventLog, LogConfig};
use crate::pipeline::Pipeline;
use crate::topics::TopicStore;

/// Topic store, pipeline and event log wired to one shared log.
///
/// Construct once at startup and share as `Arc<ControlCenter>`.
#[derive(Debug)]
pub struct ControlCenter {
    log: EventLog,
    topics: TopicStore,
    pipeline: Pipeline,
}

impl ControlCenter {
    pub fn new(queue_file: impl Into<PathBuf>, log_config: LogConfig) -> Self {
        let log = EventLog::new(log_config);
        Self {
            topics: TopicStore::new(queue_file, log.clone()),
            pipeline: Pipeline::new(log.clone()),
            log,
        }
    }

    /// Build from loaded settings, resolving the queue path against the
    /// config file's folder.
    pub fn from_config(config: &ConfigManager) -> Self {
        let log_config = LogConfig {
            capacity: config.settings().logging.buffer_capacity,
            ..LogConfig::default()
        };
        Self::new(config.topic_queue_path(), log_config)
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn topics(&self) -> &TopicStore {
        &self.topics
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use crate::logging::LogKind;
    use crate::pipeline::StageUpdate;

    fn quiet() -> LogConfig {
        LogConfig {
            capacity: 50,
            mirror_to_tracing: false,
        }
    }

    #[test]
    fn components_share_one_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topic_queue.json");
        fs::write(
            &path,
            r#"{"topics":[{"id":1,"title":"Rust in 100s","priority":1,"status":"pending"}]}"#,
        )
        .unwrap();

        let center = ControlCenter::new(&path, quiet());
        center.pipeline().start(1).unwrap();
        center.topics().set_topic_status(1, "in_progress").unwrap();
        center
            .pipeline()
            .update_stage(1, StageUpdate::new("Running").progress(5))
            .unwrap();

        let messages: Vec<String> = center
            .log()
            .tail(10)
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Pipeline started for topic #1",
                "Successfully loaded 1 topics",
                "Topics saved successfully",
                "Topic #1 status changed: pending → in_progress",
            ]
        );
    }

    #[test]
    fn from_config_uses_configured_paths_and_capacity() {
        let dir = tempdir().unwrap();
        let mut config = ConfigManager::new(dir.path().join("settings.toml"));
        config.settings_mut().paths.topic_queue_file = "queue.json".to_string();
        config.settings_mut().logging.buffer_capacity = 3;

        let center = ControlCenter::from_config(&config);

        assert_eq!(center.topics().path(), dir.path().join("queue.json"));
        assert_eq!(center.log().capacity(), 3);
    }

    #[test]
    fn missing_queue_is_logged_as_error() {
        let dir = tempdir().unwrap();
        let center = ControlCenter::new(dir.path().join("absent.json"), quiet());

        assert!(center.topics().load().is_err());

        let last = center.log().tail(1).pop().unwrap();
        assert_eq!(last.kind, LogKind::Error);
    }
}
