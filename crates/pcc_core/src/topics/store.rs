//! Durable topic queue backed by a single JSON document.
//!
//! The document is always read in full and rewritten in full. Writes go to a
//! temp file that is renamed over the original, so a failed save leaves the
//! previous document on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

use super::types::{QueueDocument, Topic, TopicId, TopicStatus};
use crate::clock;
use crate::error::ErrorKind;
use crate::logging::EventLog;

/// Errors that can occur during topic store operations.
#[derive(Error, Debug)]
pub enum TopicStoreError {
    #[error("Topic queue file not found: {}", .0.display())]
    QueueMissing(PathBuf),

    #[error("Invalid JSON in topic queue file: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Duplicate topic id {0} in topic queue")]
    DuplicateId(TopicId),

    #[error("I/O error {operation} topic queue: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Invalid status '{0}' (expected pending, in_progress or completed)")]
    InvalidStatus(String),

    #[error("Topic {0} not found")]
    TopicNotFound(TopicId),
}

impl TopicStoreError {
    fn io(operation: &'static str, source: io::Error) -> Self {
        Self::Io { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::QueueMissing(_) | Self::Io { .. } => ErrorKind::StorageFailure,
            Self::Malformed(_) | Self::DuplicateId(_) => ErrorKind::MalformedData,
            Self::InvalidStatus(_) => ErrorKind::InvalidArgument,
            Self::TopicNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for topic store operations.
pub type TopicResult<T> = Result<T, TopicStoreError>;

/// File-backed topic queue.
///
/// Every load and save reports to the shared event log.
#[derive(Debug)]
pub struct TopicStore {
    /// Path to the queue document.
    queue_file: PathBuf,
    log: EventLog,
    /// Held across load-mutate-save so in-process writers do not interleave.
    write_lock: Mutex<()>,
}

impl TopicStore {
    pub fn new(queue_file: impl Into<PathBuf>, log: EventLog) -> Self {
        Self {
            queue_file: queue_file.into(),
            log,
            write_lock: Mutex::new(()),
        }
    }

    /// Get the queue document path.
    pub fn path(&self) -> &Path {
        &self.queue_file
    }

    /// Read the full document from disk.
    ///
    /// Failures are recorded in the event log before being returned.
    pub fn load(&self) -> TopicResult<QueueDocument> {
        match self.read_document() {
            Ok(doc) => {
                self.log
                    .info(format!("Successfully loaded {} topics", doc.len()));
                Ok(doc)
            }
            Err(e) => {
                self.log.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Overwrite the full document atomically.
    pub fn save(&self, doc: &QueueDocument) -> TopicResult<()> {
        let _guard = self.write_lock.lock();
        self.persist(doc)
    }

    /// Load the document and look up one topic.
    pub fn get_topic(&self, id: TopicId) -> TopicResult<Topic> {
        let doc = self.load()?;
        doc.topic(id).cloned().ok_or(TopicStoreError::TopicNotFound(id))
    }

    /// Change a topic's status and persist the whole document.
    ///
    /// Nothing is written if the status is not a known value or the topic
    /// does not exist. The transition is logged only once the save succeeds.
    pub fn set_topic_status(&self, id: TopicId, new_status: &str) -> TopicResult<Topic> {
        let _guard = self.write_lock.lock();

        let mut doc = self.load()?;

        let status = TopicStatus::parse(new_status)
            .ok_or_else(|| TopicStoreError::InvalidStatus(new_status.to_string()))?;

        let (old_status, updated) = {
            let topic = doc.topic_mut(id).ok_or(TopicStoreError::TopicNotFound(id))?;
            let old_status = topic.status;
            topic.status = status;
            (old_status, topic.clone())
        };

        self.persist(&doc)?;

        self.log.success(format!(
            "Topic #{} status changed: {} → {}",
            id, old_status, status
        ));
        Ok(updated)
    }

    /// Load the document and stamp `metadata.exported` on the returned copy.
    ///
    /// The stamp is not written back.
    pub fn export(&self) -> TopicResult<QueueDocument> {
        let mut doc = self.load()?;
        doc.metadata
            .insert("exported".to_string(), Value::String(clock::iso_now()));
        Ok(doc)
    }

    fn read_document(&self) -> TopicResult<QueueDocument> {
        let content = match fs::read_to_string(&self.queue_file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TopicStoreError::QueueMissing(self.queue_file.clone()));
            }
            Err(e) => return Err(TopicStoreError::io("reading", e)),
        };

        let doc: QueueDocument =
            serde_json::from_str(&content).map_err(TopicStoreError::Malformed)?;
        if let Some(id) = doc.duplicate_id() {
            return Err(TopicStoreError::DuplicateId(id));
        }
        Ok(doc)
    }

    /// Save without taking the write lock. Callers must hold it.
    fn persist(&self, doc: &QueueDocument) -> TopicResult<()> {
        match self.write_document(doc) {
            Ok(()) => {
                self.log.success("Topics saved successfully");
                Ok(())
            }
            Err(e) => {
                self.log.error(format!("Error saving topics: {}", e));
                Err(e)
            }
        }
    }

    fn write_document(&self, doc: &QueueDocument) -> TopicResult<()> {
        if let Some(id) = doc.duplicate_id() {
            return Err(TopicStoreError::DuplicateId(id));
        }

        let json = serde_json::to_string_pretty(doc).map_err(TopicStoreError::Malformed)?;

        self.atomic_write(&json).map_err(|e| TopicStoreError::io("writing", e))?;

        tracing::debug!("Saved {} topics to {}", doc.len(), self.queue_file.display());
        Ok(())
    }

    /// Write content to the queue file atomically.
    ///
    /// Writes to a temp file first, then renames.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        // Write to temp file in same directory (for atomic rename)
        let temp_path = self.queue_file.with_extension("json.tmp");

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.queue_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    use crate::logging::{LogConfig, LogKind};

    fn quiet_log() -> EventLog {
        EventLog::new(LogConfig {
            capacity: 1000,
            mirror_to_tracing: false,
        })
    }

    fn sample_doc() -> serde_json::Value {
        json!({
            "topics": [
                {"id": 1, "title": "Ardour MIDI editing", "priority": 1, "status": "pending"},
                {"id": 2, "title": "Plugin chains", "priority": 2, "status": "in_progress"},
                {"id": 5, "title": "Exporting stems", "priority": 3, "status": "completed", "notes": "ünïcode"}
            ],
            "metadata": {"version": "1.0", "total_topics": 3}
        })
    }

    fn store_with(content: &str) -> (TempDir, TopicStore, EventLog) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("topic_queue.json");
        fs::write(&path, content).unwrap();
        let log = quiet_log();
        let store = TopicStore::new(path, log.clone());
        (dir, store, log)
    }

    fn sample_store() -> (TempDir, TopicStore, EventLog) {
        store_with(&format!(
            "{}\n",
            serde_json::to_string_pretty(&sample_doc()).unwrap()
        ))
    }

    fn read_back(store: &TopicStore) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap()
    }

    #[test]
    fn load_reads_all_topics() {
        let (_dir, store, log) = sample_store();

        let doc = store.load().unwrap();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.metadata["version"], "1.0");
        let last = log.tail(1).pop().unwrap();
        assert_eq!(last.kind, LogKind::Info);
        assert_eq!(last.message, "Successfully loaded 3 topics");
    }

    #[test]
    fn load_missing_file_fails_and_logs() {
        let dir = tempdir().unwrap();
        let log = quiet_log();
        let store = TopicStore::new(dir.path().join("absent.json"), log.clone());

        let err = store.load().unwrap_err();

        assert!(matches!(err, TopicStoreError::QueueMissing(_)));
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert_eq!(log.tail(1)[0].kind, LogKind::Error);
    }

    #[test]
    fn load_invalid_json_is_malformed() {
        let (_dir, store, log) = store_with("{ not json");

        let err = store.load().unwrap_err();

        assert!(matches!(err, TopicStoreError::Malformed(_)));
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(log.tail(1)[0].message.contains("Invalid JSON"));
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let (_dir, store, _log) = store_with(
            r#"{"topics": [
                {"id": 4, "title": "a", "priority": 1, "status": "pending"},
                {"id": 4, "title": "b", "priority": 1, "status": "pending"}
            ], "metadata": {}}"#,
        );

        let err = store.load().unwrap_err();
        assert!(matches!(err, TopicStoreError::DuplicateId(4)));
    }

    #[test]
    fn save_of_load_is_idempotent() {
        let (_dir, store, _log) = sample_store();
        let before = fs::read_to_string(store.path()).unwrap();

        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn save_keeps_unicode_unescaped() {
        let (_dir, store, _log) = sample_store();
        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("ünïcode"));
        assert!(raw.contains("\n  \"topics\""));
    }

    #[test]
    fn save_failure_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let log = quiet_log();
        let store = TopicStore::new(dir.path().join("missing_dir").join("q.json"), log.clone());

        let err = store.save(&QueueDocument::default()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert!(!store.path().exists());
        assert!(log.tail(1)[0].message.starts_with("Error saving topics"));
    }

    #[test]
    fn set_status_keeps_hand_written_key_order() {
        let (_dir, store, _log) = store_with(
            "{\n  \"metadata\": {\n    \"version\": \"1.0\",\n    \"created\": \"2025-01-01\"\n  },\n  \"topics\": [\n    {\n      \"id\": 1,\n      \"category\": \"daw\",\n      \"title\": \"Looping\",\n      \"priority\": 1,\n      \"status\": \"pending\"\n    }\n  ]\n}\n",
        );
        let before = fs::read_to_string(store.path()).unwrap();

        store.set_topic_status(1, "completed").unwrap();

        let after = fs::read_to_string(store.path()).unwrap();
        assert_eq!(after, before.replace("\"pending\"", "\"completed\""));
    }

    #[test]
    fn set_status_save_failure_logs_no_transition() {
        let (_dir, store, log) = sample_store();
        let before = fs::read(store.path()).unwrap();
        // A directory in the temp file's place makes the write fail
        fs::create_dir(store.path().with_extension("json.tmp")).unwrap();

        let err = store.set_topic_status(1, "completed").unwrap_err();

        assert!(matches!(err, TopicStoreError::Io { .. }));
        assert_eq!(err.kind(), ErrorKind::StorageFailure);
        assert_eq!(fs::read(store.path()).unwrap(), before);

        let last = log.tail(1).pop().unwrap();
        assert_eq!(last.kind, LogKind::Error);
        assert!(last.message.starts_with("Error saving topics"));
        assert!(log
            .tail(log.len())
            .iter()
            .all(|entry| !entry.message.contains("status changed")));
    }

    #[test]
    fn unknown_status_in_file_fails_whole_load() {
        let (_dir, store, log) = store_with(
            r#"{"topics": [
                {"id": 1, "title": "a", "priority": 1, "status": "pending"},
                {"id": 2, "title": "b", "priority": 1, "status": "archived"}
            ], "metadata": {}}"#,
        );

        let err = store.load().unwrap_err();
        assert!(matches!(err, TopicStoreError::Malformed(_)));
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(matches!(store.get_topic(1), Err(TopicStoreError::Malformed(_))));
        assert!(log.tail(1)[0].message.contains("archived"));
    }

    #[test]
    fn set_status_persists_every_valid_value() {
        let (_dir, store, _log) = sample_store();

        for status in TopicStatus::ALL {
            let topic = store.set_topic_status(1, status.as_str()).unwrap();
            assert_eq!(topic.status, status);
            assert_eq!(read_back(&store)["topics"][0]["status"], status.as_str());
        }
    }

    #[test]
    fn set_status_logs_transition() {
        let (_dir, store, log) = sample_store();

        store.set_topic_status(2, "completed").unwrap();

        let last = log.tail(1).pop().unwrap();
        assert_eq!(last.kind, LogKind::Success);
        assert_eq!(last.message, "Topic #2 status changed: in_progress → completed");
    }

    #[test]
    fn invalid_status_never_writes() {
        let (_dir, store, _log) = sample_store();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.set_topic_status(1, "archived").unwrap_err();

        assert!(matches!(err, TopicStoreError::InvalidStatus(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn unknown_topic_never_writes() {
        let (_dir, store, _log) = sample_store();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.set_topic_status(42, "completed").unwrap_err();

        assert!(matches!(err, TopicStoreError::TopicNotFound(42)));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn get_topic_finds_unsorted_ids() {
        let (_dir, store, _log) = sample_store();

        assert_eq!(store.get_topic(5).unwrap().title, "Exporting stems");
        assert!(matches!(
            store.get_topic(3),
            Err(TopicStoreError::TopicNotFound(3))
        ));
    }

    #[test]
    fn export_stamps_without_writing() {
        let (_dir, store, _log) = sample_store();

        let doc = store.export().unwrap();

        assert!(doc.metadata["exported"].is_string());
        assert!(read_back(&store)["metadata"].get("exported").is_none());
    }

    #[test]
    fn concurrent_updates_on_different_ids_both_persist() {
        let (_dir, store, _log) = sample_store();
        let store = Arc::new(store);

        let handles: Vec<_> = [(1, "completed"), (2, "pending")]
            .into_iter()
            .map(|(id, status)| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.set_topic_status(id, status).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let doc = store.load().unwrap();
        assert_eq!(doc.topic(1).unwrap().status, TopicStatus::Completed);
        assert_eq!(doc.topic(2).unwrap().status, TopicStatus::Pending);
    }

    #[test]
    fn concurrent_updates_on_same_id_last_write_wins() {
        let (_dir, store, _log) = sample_store();
        let store = Arc::new(store);

        let handles: Vec<_> = ["in_progress", "completed"]
            .into_iter()
            .map(|status| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.set_topic_status(1, status).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let status = store.load().unwrap().topic(1).unwrap().status;
        assert!(matches!(
            status,
            TopicStatus::InProgress | TopicStatus::Completed
        ));
    }
}
