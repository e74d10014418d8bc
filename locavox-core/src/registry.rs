//! Topic registry: the single authority for which topics exist

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::LocavoxConfig;
use crate::error::{LocavoxError, Result};
use crate::message::Message;
use crate::topic::Topic;

#[derive(Debug, Default)]
struct RegistryInner {
    /// Topics in registration order; the order is load-bearing for routing
    topics: Vec<Arc<Topic>>,
    /// Name index into `topics`
    by_name: HashMap<String, usize>,
}

/// Registry of all known topics.
///
/// Topics are registered once and enumerated in registration order, which
/// stays stable for the lifetime of the registry. Registration and appends
/// are atomic with respect to readers: a concurrent query never observes a
/// half-registered topic or a half-appended message.
///
/// Names are taken verbatim; equality is case-sensitive with no
/// normalization, so `"Chat"` and `"chat"` are distinct topics.
#[derive(Debug, Default)]
pub struct TopicRegistry {
    inner: RwLock<RegistryInner>,
    max_messages_per_user: Option<usize>,
}

impl TopicRegistry {
    /// Create an empty registry with no per-user message limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry enforcing a per-user message cap across all
    /// topics (checked when posting through [`TopicRegistry::create_message`])
    pub fn with_message_limit(limit: usize) -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
            max_messages_per_user: Some(limit),
        }
    }

    /// Build a registry from configuration: applies the configured message
    /// limit and registers the configured seed topics.
    pub async fn from_config(config: &LocavoxConfig) -> Result<Self> {
        let registry = Self {
            inner: RwLock::new(RegistryInner::default()),
            max_messages_per_user: config.registry.max_messages_per_user,
        };

        for seed in &config.registry.seed_topics {
            let mut topic = Topic::new(seed.name.clone());
            if let Some(description) = &seed.description {
                topic = topic.with_description(description.clone());
            }
            registry.register(topic).await?;
        }

        Ok(registry)
    }

    /// Register a topic, making it visible to subsequent queries.
    ///
    /// Fails with [`LocavoxError::InvalidTopic`] for an empty name and
    /// [`LocavoxError::DuplicateTopic`] if the name is already taken; the
    /// registry is left unchanged on failure.
    pub async fn register(&self, topic: Topic) -> Result<Arc<Topic>> {
        if topic.name().trim().is_empty() {
            return Err(LocavoxError::InvalidTopic(
                "Topic name cannot be empty".to_string(),
            ));
        }

        let mut inner = self.inner.write().await;
        if inner.by_name.contains_key(topic.name()) {
            return Err(LocavoxError::DuplicateTopic(topic.name().to_string()));
        }

        let topic = Arc::new(topic);
        let idx = inner.topics.len();
        inner.by_name.insert(topic.name().to_string(), idx);
        inner.topics.push(topic.clone());
        tracing::info!("Registered topic {}", topic.name());
        Ok(topic)
    }

    /// Snapshot of all topics in registration order
    pub async fn topics(&self) -> Vec<Arc<Topic>> {
        self.inner.read().await.topics.clone()
    }

    /// Look up a topic by exact name
    pub async fn get(&self, name: &str) -> Option<Arc<Topic>> {
        let inner = self.inner.read().await;
        inner.by_name.get(name).map(|&idx| inner.topics[idx].clone())
    }

    /// Look up a topic by exact name, failing with
    /// [`LocavoxError::TopicNotFound`] if it does not exist
    pub async fn find(&self, name: &str) -> Result<Arc<Topic>> {
        self.get(name)
            .await
            .ok_or_else(|| LocavoxError::TopicNotFound(name.to_string()))
    }

    /// Explicitly unregister a topic, preserving the relative order of the
    /// remaining topics. Returns the removed topic, if any.
    pub async fn remove(&self, name: &str) -> Option<Arc<Topic>> {
        let mut inner = self.inner.write().await;
        let idx = inner.by_name.remove(name)?;
        let removed = inner.topics.remove(idx);
        for i in idx..inner.topics.len() {
            let shifted = inner.topics[i].name().to_string();
            inner.by_name.insert(shifted, i);
        }
        tracing::info!("Removed topic {}", name);
        Some(removed)
    }

    /// Remove all topics
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.topics.clear();
        inner.by_name.clear();
    }

    /// Number of registered topics
    pub async fn len(&self) -> usize {
        self.inner.read().await.topics.len()
    }

    /// Whether the registry holds no topics
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.topics.is_empty()
    }

    /// Create a message and append it to the named topic.
    ///
    /// Fails with [`LocavoxError::TopicNotFound`] if the topic does not
    /// exist, and with [`LocavoxError::MessageLimitExceeded`] when a per-user
    /// cap is configured and the author is already at it.
    pub async fn create_message(
        &self,
        topic_name: &str,
        user_id: impl Into<String>,
        content: impl Into<String>,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<Message> {
        let topic = self.find(topic_name).await?;
        let user_id = user_id.into();

        if let Some(limit) = self.max_messages_per_user {
            let posted = self.count_user_messages(&user_id).await;
            if posted >= limit {
                tracing::warn!(
                    "User {} is at the message limit ({}) - rejecting post to {}",
                    user_id,
                    limit,
                    topic_name
                );
                return Err(LocavoxError::MessageLimitExceeded { user_id, limit });
            }
        }

        let mut message = Message::new(user_id, content);
        if let Some(metadata) = metadata {
            message = message.with_metadata(metadata);
        }
        topic.append(message.clone()).await;
        Ok(message)
    }

    /// Total number of messages by a user across all topics
    pub async fn count_user_messages(&self, user_id: &str) -> usize {
        let mut total = 0;
        for topic in self.topics().await {
            total += topic.user_message_count(user_id).await;
        }
        total
    }

    /// The configured per-user message cap, if any
    pub fn message_limit(&self) -> Option<usize> {
        self.max_messages_per_user
    }
}
