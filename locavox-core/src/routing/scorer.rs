//! Relevance scoring strategies
//!
//! Scoring is the replaceable step of the routing pass: the registry scan
//! and first-match tie-break never change, while the scorer can be swapped
//! for TF-IDF, embedding similarity, or an LLM-backed classifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;

use super::query::RouteQuery;

/// Relevance strategy for matching a message against a query.
///
/// A message is considered a match when `score > threshold`. Boolean
/// strategies map to scores of `0.0` and `1.0` against the default
/// threshold.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Score a message's relevance to the query (0.0 to 1.0)
    async fn score(&self, query: &RouteQuery, message: &Message) -> Result<f32>;

    /// Minimum exclusive score for a match
    fn threshold(&self) -> f32 {
        0.0
    }
}

/// Scorer selection for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// Per-token substring matching (the baseline)
    #[default]
    Keyword,

    /// Whole-query substring matching
    Phrase,
}

/// The searchable text of a message: the content, plus metadata string
/// values when opted in.
fn haystacks(message: &Message, include_metadata: bool) -> Vec<String> {
    let mut texts = vec![message.content.to_lowercase()];
    if include_metadata {
        for value in message.metadata.values() {
            if let Some(s) = value.as_str() {
                texts.push(s.to_lowercase());
            }
        }
    }
    texts
}

/// Keyword-overlap scorer: the fraction of query tokens that appear as
/// substrings of the message content. Any single token hit makes the
/// message a match.
///
/// Matching is substring containment, not whole-word: the token `ladder`
/// matches `ladders`, and the token `lad` matches `ladder`.
#[derive(Debug, Clone, Default)]
pub struct KeywordScorer {
    include_metadata: bool,
}

impl KeywordScorer {
    /// Create a scorer over message content only
    pub fn new() -> Self {
        Self::default()
    }

    /// Also scan string values in message metadata
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }
}

#[async_trait]
impl MatchScorer for KeywordScorer {
    async fn score(&self, query: &RouteQuery, message: &Message) -> Result<f32> {
        let tokens = query.tokens();
        if tokens.is_empty() {
            return Ok(0.0);
        }

        let texts = haystacks(message, self.include_metadata);
        let hits = tokens
            .iter()
            .filter(|token| texts.iter().any(|text| text.contains(token.as_str())))
            .count();

        Ok(hits as f32 / tokens.len() as f32)
    }
}

/// Whole-query scorer: matches when the entire normalized query occurs as a
/// substring of the message content. Stricter than [`KeywordScorer`], useful
/// for exact-phrase lookups.
#[derive(Debug, Clone, Default)]
pub struct PhraseScorer {
    include_metadata: bool,
}

impl PhraseScorer {
    /// Create a scorer over message content only
    pub fn new() -> Self {
        Self::default()
    }

    /// Also scan string values in message metadata
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }
}

#[async_trait]
impl MatchScorer for PhraseScorer {
    async fn score(&self, query: &RouteQuery, message: &Message) -> Result<f32> {
        if query.is_empty() {
            return Ok(0.0);
        }

        let phrase = query.raw().trim().to_lowercase();
        let texts = haystacks(message, self.include_metadata);
        if texts.iter().any(|text| text.contains(&phrase)) {
            Ok(1.0)
        } else {
            Ok(0.0)
        }
    }
}
