//! Locavox CLI - Command-line tools for the community platform core

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use locavox_core::prelude::*;

#[derive(Parser)]
#[command(name = "locavox")]
#[command(about = "Locavox community platform CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the resolved configuration
    ShowConfig,
    /// List the configured topics in registration order
    Topics,
    /// Route a free-text query against a demo registry
    Route {
        /// The query text
        query: Vec<String>,
        /// Rank every topic instead of stopping at the first match
        #[arg(long)]
        all: bool,
    },
    /// Version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("locavox {}", env!("CARGO_PKG_VERSION"));
            println!("locavox-core {}", locavox_core::VERSION);
        }
        Commands::ShowConfig => {
            let config = LocavoxConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Topics => {
            let config = LocavoxConfig::load()?;
            let registry = TopicRegistry::from_config(&config).await?;
            for topic in registry.topics().await {
                println!("{} - {}", topic.name(), topic.description());
            }
        }
        Commands::Route { query, all } => {
            let query = query.join(" ");
            let config = LocavoxConfig::load()?;
            let registry = Arc::new(TopicRegistry::from_config(&config).await?);
            seed_demo_messages(&registry).await?;

            let router = QueryRouter::from_config(registry, &config);
            if all {
                let results = router.search_all(&query).await?;
                if results.is_empty() {
                    println!("No topic matched \"{}\"", query);
                }
                for result in results {
                    println!("{} (score {:.2})", result.topic.name(), result.score);
                    for message in &result.messages {
                        println!("  [{}] {}", message.user_id, message.content);
                    }
                }
            } else {
                match router.route(&query).await? {
                    Some(hit) => {
                        println!("Topic: {}", hit.topic.name());
                        for message in &hit.messages {
                            println!("  [{}] {}", message.user_id, message.content);
                        }
                    }
                    None => println!("No topic matched \"{}\"", query),
                }
            }
        }
    }

    Ok(())
}

/// Post a handful of demo messages so routing has something to match
async fn seed_demo_messages(registry: &TopicRegistry) -> Result<()> {
    if registry.get("marketplace").await.is_some() {
        registry
            .create_message(
                "marketplace",
                "maria",
                "Offering: ladder - available weekend",
                None,
            )
            .await?;
        registry
            .create_message(
                "marketplace",
                "tom",
                "Looking for help moving a couch on Saturday",
                None,
            )
            .await?;
    }
    if registry.get("chat").await.is_some() {
        registry
            .create_message("chat", "sam", "Beautiful weather today", None)
            .await?;
    }
    Ok(())
}
