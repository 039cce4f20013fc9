//! Topic queue management.
//!
//! This module provides:
//! - `TopicStore`: durable queue document with atomic whole-file writes
//! - `QueueDocument`: topics plus free-form metadata
//! - `Topic` / `TopicStatus`: a unit of work and its lifecycle

mod store;
mod types;

pub use store::{TopicResult, TopicStore, TopicStoreError};
pub use types::{QueueDocument, Topic, TopicId, TopicStatus};
