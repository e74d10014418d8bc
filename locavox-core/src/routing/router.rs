//! Query router: matches free-text queries to a topic and its relevant
//! messages

use std::sync::Arc;
use std::time::Duration;

use crate::config::LocavoxConfig;
use crate::error::{LocavoxError, Result};
use crate::message::Message;
use crate::registry::TopicRegistry;
use crate::topic::Topic;

use super::query::RouteQuery;
use super::scorer::{KeywordScorer, MatchScorer};

/// A successful routing outcome: the winning topic and every message in it
/// that matched the query, in insertion order.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The first-registered topic that produced a non-empty match set
    pub topic: Arc<Topic>,
    /// All matching messages within that topic
    pub messages: Vec<Message>,
}

/// One topic's results from a ranked search across the whole registry
#[derive(Debug, Clone)]
pub struct TopicMatches {
    /// The matched topic
    pub topic: Arc<Topic>,
    /// Matching messages in insertion order
    pub messages: Vec<Message>,
    /// Sum of the matched messages' scores
    pub score: f32,
}

/// Routes free-text queries to the best topic in a registry.
///
/// The router is a pure reader: it never mutates topics or the registry,
/// and two calls with the same query and no intervening mutation return
/// identical results. Topics are scanned in registration order and the
/// first topic with any matching message wins; the scan is bounded at
/// O(topics x messages x tokens).
pub struct QueryRouter {
    registry: Arc<TopicRegistry>,
    scorer: Arc<dyn MatchScorer>,
    deadline: Option<Duration>,
}

impl std::fmt::Debug for QueryRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRouter")
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl QueryRouter {
    /// Create a router with the baseline keyword scorer
    pub fn new(registry: Arc<TopicRegistry>) -> Self {
        Self::with_scorer(registry, Arc::new(KeywordScorer::new()))
    }

    /// Create a router with a specific scoring strategy
    pub fn with_scorer(registry: Arc<TopicRegistry>, scorer: Arc<dyn MatchScorer>) -> Self {
        Self {
            registry,
            scorer,
            deadline: None,
        }
    }

    /// Create a router with the scorer and deadline from configuration
    pub fn from_config(registry: Arc<TopicRegistry>, config: &LocavoxConfig) -> Self {
        Self {
            registry,
            scorer: config.routing.build_scorer(),
            deadline: config.routing.route_deadline,
        }
    }

    /// Create a new router builder
    pub fn builder() -> QueryRouterBuilder {
        QueryRouterBuilder::new()
    }

    /// Route a query to the first-registered topic containing any matching
    /// message, together with all of that topic's matches.
    ///
    /// `Ok(None)` is the normal no-match outcome, returned both when no
    /// topic matches and when the query has no extractable tokens. Errors
    /// are reserved for scorer failures and deadline overruns.
    pub async fn route(&self, query: &str) -> Result<Option<RouteMatch>> {
        match self.deadline {
            Some(deadline) => self.route_with_deadline(query, deadline).await,
            None => self.route_inner(query).await,
        }
    }

    /// Route with an explicit cap on the scan, for callers with unbounded
    /// topic or message counts
    pub async fn route_with_deadline(
        &self,
        query: &str,
        deadline: Duration,
    ) -> Result<Option<RouteMatch>> {
        tokio::time::timeout(deadline, self.route_inner(query))
            .await
            .map_err(|_| LocavoxError::RouteTimeout)?
    }

    async fn route_inner(&self, query: &str) -> Result<Option<RouteMatch>> {
        let query = RouteQuery::parse(query);
        if query.is_empty() {
            tracing::debug!("Query '{}' has no tokens - nothing to match", query.raw());
            return Ok(None);
        }

        for topic in self.registry.topics().await {
            let (messages, _score) = self.matching_messages(&query, &topic).await?;
            if !messages.is_empty() {
                tracing::debug!(
                    "Query '{}' routed to topic {} ({} matching messages)",
                    query.raw(),
                    topic.name(),
                    messages.len()
                );
                return Ok(Some(RouteMatch { topic, messages }));
            }
        }

        tracing::debug!("No topic matched query '{}'", query.raw());
        Ok(None)
    }

    /// Search every topic and rank the results by total relevance.
    ///
    /// Unlike [`QueryRouter::route`], this does not stop at the first hit:
    /// all topics with a non-empty match set are returned, ordered by
    /// descending score (registration order breaks ties).
    pub async fn search_all(&self, query: &str) -> Result<Vec<TopicMatches>> {
        let query = RouteQuery::parse(query);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for topic in self.registry.topics().await {
            let (messages, score) = self.matching_messages(&query, &topic).await?;
            if !messages.is_empty() {
                results.push(TopicMatches {
                    topic,
                    messages,
                    score,
                });
            }
        }

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(results)
    }

    /// Collect all matching messages in one topic, in insertion order,
    /// along with their total score
    async fn matching_messages(
        &self,
        query: &RouteQuery,
        topic: &Arc<Topic>,
    ) -> Result<(Vec<Message>, f32)> {
        let threshold = self.scorer.threshold();
        let mut matches = Vec::new();
        let mut total = 0.0_f32;

        for message in topic.messages().await {
            let score = self.scorer.score(query, &message).await?;
            if score > threshold {
                total += score;
                matches.push(message);
            }
        }

        Ok((matches, total))
    }
}

/// Builder for creating query routers
pub struct QueryRouterBuilder {
    registry: Option<Arc<TopicRegistry>>,
    scorer: Option<Arc<dyn MatchScorer>>,
    deadline: Option<Duration>,
}

impl QueryRouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            registry: None,
            scorer: None,
            deadline: None,
        }
    }

    /// Set the registry to route over
    pub fn registry(mut self, registry: Arc<TopicRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the scoring strategy
    pub fn scorer(mut self, scorer: Arc<dyn MatchScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Cap every routing scan at `deadline`
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Build the router
    pub fn build(self) -> Result<QueryRouter> {
        let registry = self.registry.ok_or_else(|| {
            LocavoxError::Configuration("QueryRouter requires a registry".to_string())
        })?;

        Ok(QueryRouter {
            registry,
            scorer: self.scorer.unwrap_or_else(|| Arc::new(KeywordScorer::new())),
            deadline: self.deadline,
        })
    }
}

impl Default for QueryRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
