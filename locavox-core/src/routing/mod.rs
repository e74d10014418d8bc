//! Query routing engine
//!
//! This module matches free-form requests ("does someone have a ladder to
//! lend?") to the registered topic that holds relevant messages:
//! - Queries are normalized into lower-cased keyword tokens
//! - Topics are scanned in registration order; the first topic with any
//!   matching message wins and all of its matches are returned
//! - The relevance strategy is pluggable via [`MatchScorer`]

mod query;
mod router;
mod scorer;

pub use query::RouteQuery;
pub use router::{QueryRouter, QueryRouterBuilder, RouteMatch, TopicMatches};
pub use scorer::{KeywordScorer, MatchScorer, PhraseScorer, ScorerKind};
