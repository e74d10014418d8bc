//! Configuration types for the Locavox core

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::routing::{KeywordScorer, MatchScorer, PhraseScorer, ScorerKind};

/// Main configuration for the Locavox core
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocavoxConfig {
    /// Topic registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Query routing configuration
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Topic registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum number of messages a user may post across all topics;
    /// `None` disables the cap
    #[serde(default = "default_message_limit")]
    pub max_messages_per_user: Option<usize>,

    /// Topics registered up front by [`TopicRegistry::from_config`]
    ///
    /// [`TopicRegistry::from_config`]: crate::registry::TopicRegistry::from_config
    #[serde(default = "default_seed_topics")]
    pub seed_topics: Vec<SeedTopic>,
}

fn default_message_limit() -> Option<usize> {
    Some(100)
}

fn default_seed_topics() -> Vec<SeedTopic> {
    vec![
        SeedTopic {
            name: "marketplace".to_string(),
            description: Some("Community Task Marketplace".to_string()),
        },
        SeedTopic {
            name: "chat".to_string(),
            description: Some("Neighborhood Hub Chat".to_string()),
        },
    ]
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_messages_per_user: default_message_limit(),
            seed_topics: default_seed_topics(),
        }
    }
}

/// A topic registered at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTopic {
    /// Topic name, taken verbatim
    pub name: String,

    /// Optional description; defaults to the topic's generated one
    #[serde(default)]
    pub description: Option<String>,
}

/// Query routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Relevance strategy used by the router
    #[serde(default)]
    pub scorer: ScorerKind,

    /// Also scan string values in message metadata when matching
    #[serde(default)]
    pub match_metadata: bool,

    /// Optional cap on a single routing scan
    #[serde(default, with = "humantime_serde")]
    pub route_deadline: Option<Duration>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::default(),
            match_metadata: false,
            route_deadline: None,
        }
    }
}

impl RoutingConfig {
    /// Build the configured scorer
    pub fn build_scorer(&self) -> Arc<dyn MatchScorer> {
        match self.scorer {
            ScorerKind::Keyword => {
                let mut scorer = KeywordScorer::new();
                if self.match_metadata {
                    scorer = scorer.with_metadata();
                }
                Arc::new(scorer)
            }
            ScorerKind::Phrase => {
                let mut scorer = PhraseScorer::new();
                if self.match_metadata {
                    scorer = scorer.with_metadata();
                }
                Arc::new(scorer)
            }
        }
    }
}

impl LocavoxConfig {
    /// Load configuration from `locavox.toml` and `LOCAVOX_`-prefixed
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is invalid.
    pub fn load() -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Toml},
        };

        let mut figment = Figment::new()
            .merge(Toml::file("locavox.toml"))
            .merge(Env::prefixed("LOCAVOX_").split("_"));

        // Check for custom config path
        if let Ok(path) = std::env::var("LOCAVOX_CONFIG_PATH") {
            figment = figment.merge(Toml::file(path));
        }

        let config: LocavoxConfig = figment.extract().map_err(|e| {
            crate::error::LocavoxError::Configuration(format!("Failed to load configuration: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        use figment::{
            Figment,
            providers::{Format, Toml},
        };

        let config: LocavoxConfig =
            Figment::new()
                .merge(Toml::file(path))
                .extract()
                .map_err(|e| {
                    crate::error::LocavoxError::Configuration(format!(
                        "Failed to load configuration file: {}",
                        e
                    ))
                })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn validate(&self) -> crate::error::Result<()> {
        if self.registry.max_messages_per_user == Some(0) {
            return Err(crate::error::LocavoxError::Configuration(
                "max_messages_per_user must be at least 1 (omit it to disable the cap)".to_string(),
            ));
        }

        for seed in &self.registry.seed_topics {
            if seed.name.trim().is_empty() {
                return Err(crate::error::LocavoxError::Configuration(
                    "Seed topic names cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
