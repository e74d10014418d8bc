//! Community routing example
//!
//! Seeds the two standard community topics, posts a few messages, and
//! routes free-text requests to the topic holding relevant posts.

use std::sync::Arc;

use locavox_core::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("🏘️  Community Routing Example");
    println!("============================\n");

    // Seed the standard topics from the default configuration
    let config = LocavoxConfig::default();
    let registry = Arc::new(TopicRegistry::from_config(&config).await?);
    println!("Registered topics:");
    for topic in registry.topics().await {
        println!("  • {} - {}", topic.name(), topic.description());
    }
    println!();

    // Post some community messages
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
    registry
        .create_message("chat", "sam", "Beautiful weather today", None)
        .await?;

    // Route free-text requests
    let router = QueryRouter::from_config(registry.clone(), &config);
    for query in [
        "does anyone have a ladder to lend?",
        "need a hand moving furniture",
        "how is the weather",
        "lost my keys",
    ] {
        println!("Routing: \"{}\"", query);
        match router.route(query).await? {
            Some(hit) => {
                println!("  → topic '{}'", hit.topic.name());
                for message in &hit.messages {
                    println!("    • [{}] {}", message.user_id, message.content);
                }
            }
            None => println!("  → no matching topic"),
        }
        println!();
    }

    // Ranked search across every topic
    let results = router.search_all("weekend weather").await?;
    println!("Ranked search for \"weekend weather\":");
    for result in &results {
        println!(
            "  {} (score {:.2}, {} message(s))",
            result.topic.name(),
            result.score,
            result.messages.len()
        );
    }

    Ok(())
}
