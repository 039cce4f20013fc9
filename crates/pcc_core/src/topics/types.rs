//! Topic queue types and data structures.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Externally assigned topic identifier.
pub type TopicId = i64;

/// Status of a topic in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    /// Waiting to be produced.
    #[default]
    Pending,
    /// Currently going through the pipeline.
    InProgress,
    /// Finished.
    Completed,
}

impl TopicStatus {
    pub const ALL: [TopicStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Wire name, as stored in the queue document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parse a wire name. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl std::fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single content idea in the queue.
///
/// Key order is remembered on read so a save writes fields back where the
/// file had them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub priority: i64,
    pub status: TopicStatus,
    /// Fields this service does not interpret, kept for round-tripping.
    pub extra: Map<String, Value>,
    key_order: Vec<String>,
}

impl Topic {
    pub fn new(id: TopicId, title: impl Into<String>, priority: i64) -> Self {
        Self {
            id,
            title: title.into(),
            priority,
            status: TopicStatus::Pending,
            extra: Map::new(),
            key_order: Vec::new(),
        }
    }
}

impl TryFrom<Map<String, Value>> for Topic {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let key_order = fields.keys().cloned().collect();
        Ok(Self {
            id: take(&mut fields, "id")?,
            title: take(&mut fields, "title")?,
            priority: take(&mut fields, "priority")?,
            status: take(&mut fields, "status")?,
            extra: fields,
            key_order,
        })
    }
}

impl From<Topic> for Map<String, Value> {
    fn from(topic: Topic) -> Self {
        let known = vec![
            ("id", Value::from(topic.id)),
            ("title", Value::from(topic.title)),
            ("priority", Value::from(topic.priority)),
            ("status", Value::from(topic.status.as_str())),
        ];
        in_key_order(&topic.key_order, known, topic.extra)
    }
}

/// The durable queue document: every topic plus free-form metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct QueueDocument {
    /// Topics in queue order.
    pub topics: Vec<Topic>,
    /// Empty when the file has no `metadata` key.
    pub metadata: Map<String, Value>,
    /// Unknown top-level keys, kept for round-tripping.
    pub extra: Map<String, Value>,
    key_order: Vec<String>,
}

impl TryFrom<Map<String, Value>> for QueueDocument {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let key_order = fields.keys().cloned().collect();
        let metadata = match fields.remove("metadata") {
            Some(value) => serde_json::from_value(value).map_err(|e| format!("metadata: {}", e))?,
            None => Map::new(),
        };
        Ok(Self {
            topics: take(&mut fields, "topics")?,
            metadata,
            extra: fields,
            key_order,
        })
    }
}

impl From<QueueDocument> for Map<String, Value> {
    fn from(doc: QueueDocument) -> Self {
        let topics = doc.topics.into_iter().map(Map::from).map(Value::Object);
        let known = vec![
            ("topics", Value::Array(topics.collect())),
            ("metadata", Value::Object(doc.metadata)),
        ];
        in_key_order(&doc.key_order, known, doc.extra)
    }
}

/// Remove a required field and decode it.
fn take<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Result<T, String> {
    let value = fields
        .remove(key)
        .ok_or_else(|| format!("missing field `{}`", key))?;
    serde_json::from_value(value).map_err(|e| format!("{}: {}", key, e))
}

/// Rebuild an object with keys in `order`. Keys not in `order` follow,
/// known fields first.
fn in_key_order(
    order: &[String],
    known: Vec<(&'static str, Value)>,
    mut extra: Map<String, Value>,
) -> Map<String, Value> {
    let mut known: Vec<(&str, Option<Value>)> =
        known.into_iter().map(|(key, value)| (key, Some(value))).collect();
    let mut out = Map::new();

    for key in order {
        if let Some((_, slot)) = known.iter_mut().find(|(name, _)| *name == key.as_str()) {
            if let Some(value) = slot.take() {
                out.insert(key.clone(), value);
            }
        } else if let Some(value) = extra.remove(key) {
            out.insert(key.clone(), value);
        }
    }
    for (key, slot) in known {
        if let Some(value) = slot {
            out.insert(key.to_string(), value);
        }
    }
    out.extend(extra);
    out
}

impl QueueDocument {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Find a topic by id. Ids are not assumed sorted.
    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Find a mutable topic by id.
    pub fn topic_mut(&mut self, id: TopicId) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// First id that appears more than once, if any.
    pub fn duplicate_id(&self) -> Option<TopicId> {
        let mut seen = HashSet::with_capacity(self.topics.len());
        self.topics.iter().map(|t| t.id).find(|id| !seen.insert(*id))
    }
}
