//! Message model for topic contributions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single contribution posted into a topic.
///
/// Messages are immutable once appended to a topic: the id and timestamp are
/// stamped at construction and never change, and topics never reorder,
/// rewrite, or deduplicate entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique message id, assigned at creation
    pub id: Uuid,

    /// Message body (the core does not require non-empty content)
    pub content: String,

    /// Author id; opaque string, no referential integrity enforced here
    pub user_id: String,

    /// Creation instant
    pub timestamp: DateTime<Utc>,

    /// Open key/value context, e.g. `{"type": "offer", "item": "ladder"}`.
    /// Not inspected by the default matcher; scorers may opt in to it.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Message {
    /// Create a new message with a fresh id and timestamp
    pub fn new(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Replace the metadata map
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add a single metadata entry
    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
