//! Query normalization

/// A free-text query normalized for matching: lower-cased, split on
/// whitespace, empty tokens discarded, duplicates dropped.
///
/// A query with no extractable tokens matches nothing, not everything.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    raw: String,
    tokens: Vec<String>,
}

impl RouteQuery {
    /// Normalize a raw query string
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut tokens: Vec<String> = Vec::new();
        for token in raw.to_lowercase().split_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        Self { raw, tokens }
    }

    /// The query as the caller supplied it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized keyword tokens (order is not significant)
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether normalization produced no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
