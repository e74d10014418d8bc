//! Error types for Locavox operations

/// Result type for Locavox operations
pub type Result<T> = std::result::Result<T, LocavoxError>;

/// Error types for the Locavox core
#[derive(Debug, thiserror::Error)]
pub enum LocavoxError {
    /// Registration with a topic name that is already taken
    #[error("Duplicate topic: {0}")]
    DuplicateTopic(String),

    /// Operation referenced a topic that does not exist
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    /// Invalid topic name
    #[error("Invalid topic name: {0}")]
    InvalidTopic(String),

    /// Malformed caller input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Author has reached the configured message cap
    #[error("Message limit exceeded for user {user_id} (limit: {limit})")]
    MessageLimitExceeded { user_id: String, limit: usize },

    /// Routing exceeded the caller-supplied deadline
    #[error("Routing deadline exceeded")]
    RouteTimeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for LocavoxError {
    fn from(s: String) -> Self {
        LocavoxError::Other(s)
    }
}

impl From<&str> for LocavoxError {
    fn from(s: &str) -> Self {
        LocavoxError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for LocavoxError {
    fn from(err: anyhow::Error) -> Self {
        LocavoxError::Other(err.to_string())
    }
}
