//! Topics: named, append-only message logs

use tokio::sync::RwLock;

use crate::message::Message;

/// A named channel holding an ordered log of messages.
///
/// The topic exclusively owns its message log; all mutation goes through
/// [`Topic::append`]. Readers always see a consistent snapshot, so the log is
/// safe to iterate while appends continue elsewhere. There is no in-place
/// edit or delete and no capacity limit at the topic level (the per-user cap
/// lives in the registry).
#[derive(Debug)]
pub struct Topic {
    name: String,
    description: String,
    messages: RwLock<Vec<Message>>,
}

impl Topic {
    /// Create a topic with a default description
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let description = format!("Topic for {}", name);
        Self {
            name,
            description,
            messages: RwLock::new(Vec::new()),
        }
    }

    /// Set the topic description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the topic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the topic description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Append a message to the end of the log
    pub async fn append(&self, message: Message) {
        let mut messages = self.messages.write().await;
        tracing::debug!("Added message {} to topic {}", message.id, self.name);
        messages.push(message);
    }

    /// Snapshot of the full log in insertion order
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Most recent messages first, capped at `limit`.
    /// Timestamp ties resolve to the later-appended message first.
    pub async fn recent(&self, limit: usize) -> Vec<Message> {
        let mut messages = self.messages.read().await.clone();
        messages.sort_by_key(|m| m.timestamp);
        messages.reverse();
        messages.truncate(limit);
        messages
    }

    /// Messages by a specific author, most recent first, capped at `limit`
    pub async fn messages_by_user(&self, user_id: &str, limit: usize) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages.reverse();
        messages.truncate(limit);
        messages
    }

    /// Number of messages by a specific author
    pub async fn user_message_count(&self, user_id: &str) -> usize {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id)
            .count()
    }

    /// Case-insensitive substring search over message content, in insertion order
    pub async fn search(&self, query: &str) -> Vec<Message> {
        let query = query.to_lowercase();
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Number of messages in the log
    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Whether the log is empty
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}
