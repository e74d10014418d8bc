//! # Locavox Core - Community Topic Registry & Query Routing
//!
//! Locavox routes questions and needs to the right community topic. This
//! crate is the platform's core: an in-memory data model and matching
//! engine with no transport, persistence, or UI concerns:
//! - Immutable, timestamped [`Message`]s with open metadata
//! - Append-only [`Topic`] logs with consistent read snapshots
//! - A [`TopicRegistry`] enforcing name uniqueness and stable
//!   registration order
//! - A [`QueryRouter`] that matches free-text queries to the first
//!   relevant topic, with a pluggable relevance strategy
//!
//! [`Message`]: message::Message
//! [`Topic`]: topic::Topic
//! [`TopicRegistry`]: registry::TopicRegistry
//! [`QueryRouter`]: routing::QueryRouter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use locavox_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let registry = Arc::new(TopicRegistry::new());
//!     registry
//!         .register(Topic::new("marketplace").with_description("Community Task Marketplace"))
//!         .await?;
//!     registry
//!         .create_message("marketplace", "user-1", "Offering: ladder - available weekend", None)
//!         .await?;
//!
//!     let router = QueryRouter::new(registry);
//!     if let Some(hit) = router.route("does anyone have a ladder").await? {
//!         println!("matched topic: {}", hit.topic.name());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Registration, appends, and routing may run from any number of
//! concurrent tasks. Mutations are atomic with respect to readers, and
//! readers always observe consistent snapshots; registration order, once
//! observed, never changes.

pub mod config;
pub mod error;
pub mod message;
pub mod registry;
pub mod routing;
pub mod topic;

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{LocavoxConfig, RegistryConfig, RoutingConfig, SeedTopic};
    pub use crate::error::{LocavoxError, Result};
    pub use crate::message::Message;
    pub use crate::registry::TopicRegistry;
    pub use crate::routing::{
        KeywordScorer, MatchScorer, PhraseScorer, QueryRouter, QueryRouterBuilder, RouteMatch,
        RouteQuery, ScorerKind, TopicMatches,
    };
    pub use crate::topic::Topic;
}
