//! Integration tests for query routing

use std::sync::Arc;
use std::time::Duration;

use locavox_core::prelude::*;
use tokio_test::assert_ok;

async fn demo_registry() -> Arc<TopicRegistry> {
    let registry = Arc::new(TopicRegistry::new());
    registry
        .register(Topic::new("marketplace").with_description("Community Task Marketplace"))
        .await
        .unwrap();
    registry
        .register(Topic::new("chat").with_description("Neighborhood Hub Chat"))
        .await
        .unwrap();
    registry
        .create_message(
            "marketplace",
            "user-1",
            "Offering: ladder - available weekend",
            None,
        )
        .await
        .unwrap();
    registry
        .create_message("chat", "user-2", "Beautiful weather today", None)
        .await
        .unwrap();
    registry
}

#[tokio::test]
async fn test_ladder_query_routes_to_marketplace() {
    let registry = demo_registry().await;
    let router = QueryRouter::new(registry);

    let hit = router
        .route("does anyone have a ladder")
        .await
        .unwrap()
        .expect("query should match");

    assert_eq!(hit.topic.name(), "marketplace");
    assert_eq!(hit.messages.len(), 1);
    assert_eq!(hit.messages[0].content, "Offering: ladder - available weekend");
}

#[tokio::test]
async fn test_no_overlap_returns_none() {
    let registry = demo_registry().await;
    let router = QueryRouter::new(registry);

    assert!(router.route("xylophone").await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_and_whitespace_queries_match_nothing() {
    let registry = demo_registry().await;
    let router = QueryRouter::new(registry);

    let result = tokio_test::assert_ok!(router.route("").await);
    assert!(result.is_none());

    let result = tokio_test::assert_ok!(router.route("   \t  ").await);
    assert!(result.is_none());
}

#[tokio::test]
async fn test_first_registered_topic_wins() {
    let registry = Arc::new(TopicRegistry::new());
    registry.register(Topic::new("first")).await.unwrap();
    registry.register(Topic::new("second")).await.unwrap();

    registry
        .create_message("first", "user-1", "one ladder here", None)
        .await
        .unwrap();
    // The later topic has the larger match set and still loses
    for i in 0..3 {
        registry
            .create_message("second", "user-2", format!("ladder number {}", i), None)
            .await
            .unwrap();
    }

    let router = QueryRouter::new(registry);
    let hit = router.route("ladder").await.unwrap().unwrap();
    assert_eq!(hit.topic.name(), "first");
    assert_eq!(hit.messages.len(), 1);
}

#[tokio::test]
async fn test_all_matching_messages_collected_within_topic() {
    let registry = Arc::new(TopicRegistry::new());
    registry.register(Topic::new("marketplace")).await.unwrap();

    registry
        .create_message("marketplace", "user-1", "ladder for lending", None)
        .await
        .unwrap();
    registry
        .create_message("marketplace", "user-2", "selling a couch", None)
        .await
        .unwrap();
    registry
        .create_message("marketplace", "user-3", "step ladder, barely used", None)
        .await
        .unwrap();

    let router = QueryRouter::new(registry);
    let hit = router.route("ladder").await.unwrap().unwrap();
    assert_eq!(hit.messages.len(), 2);
    // Matches come back in insertion order
    assert_eq!(hit.messages[0].content, "ladder for lending");
    assert_eq!(hit.messages[1].content, "step ladder, barely used");
}

#[tokio::test]
async fn test_route_is_idempotent() {
    let registry = demo_registry().await;
    let router = QueryRouter::new(registry);

    let first = router.route("ladder weekend").await.unwrap().unwrap();
    let second = router.route("ladder weekend").await.unwrap().unwrap();

    assert_eq!(first.topic.name(), second.topic.name());
    assert_eq!(first.messages, second.messages);
}

#[tokio::test]
async fn test_routing_does_not_mutate_state() {
    let registry = demo_registry().await;
    let router = QueryRouter::new(registry.clone());

    router.route("ladder").await.unwrap();
    router.route("weather").await.unwrap();
    router.route("nothing-matches-this").await.unwrap();

    assert_eq!(registry.len().await, 2);
    let marketplace = registry.find("marketplace").await.unwrap();
    assert_eq!(marketplace.message_count().await, 1);
}

#[tokio::test]
async fn test_search_all_ranks_by_total_score() {
    let registry = Arc::new(TopicRegistry::new());
    registry.register(Topic::new("first")).await.unwrap();
    registry.register(Topic::new("second")).await.unwrap();

    registry
        .create_message("first", "user-1", "one ladder here", None)
        .await
        .unwrap();
    for i in 0..3 {
        registry
            .create_message("second", "user-2", format!("ladder number {}", i), None)
            .await
            .unwrap();
    }

    let router = QueryRouter::new(registry);
    let results = router.search_all("ladder").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].topic.name(), "second");
    assert_eq!(results[0].messages.len(), 3);
    assert_eq!(results[1].topic.name(), "first");
    assert!(results[0].score > results[1].score);

    assert!(router.search_all("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_phrase_scorer_via_builder() {
    let registry = demo_registry().await;
    let router = QueryRouter::builder()
        .registry(registry)
        .scorer(Arc::new(PhraseScorer::new()))
        .build()
        .unwrap();

    // Token overlap alone is not enough for the phrase strategy
    assert!(router.route("ladder weekend").await.unwrap().is_none());

    let hit = router.route("available weekend").await.unwrap().unwrap();
    assert_eq!(hit.topic.name(), "marketplace");
}

#[tokio::test]
async fn test_metadata_matching_from_config() {
    let registry = Arc::new(TopicRegistry::new());
    registry.register(Topic::new("marketplace")).await.unwrap();

    let mut metadata = std::collections::HashMap::new();
    metadata.insert("type".to_string(), serde_json::json!("offer"));
    metadata.insert("item".to_string(), serde_json::json!("ladder"));
    registry
        .create_message("marketplace", "user-1", "see listing details", Some(metadata))
        .await
        .unwrap();

    let config = LocavoxConfig::default();
    let content_only = QueryRouter::from_config(registry.clone(), &config);
    assert!(content_only.route("ladder").await.unwrap().is_none());

    let mut config = LocavoxConfig::default();
    config.routing.match_metadata = true;
    let with_metadata = QueryRouter::from_config(registry, &config);
    let hit = with_metadata.route("ladder").await.unwrap().unwrap();
    assert_eq!(hit.messages.len(), 1);
}

#[tokio::test]
async fn test_route_with_deadline_on_populated_registry() {
    let registry = demo_registry().await;
    let router = QueryRouter::new(registry);

    let hit = router
        .route_with_deadline("ladder", Duration::from_secs(5))
        .await
        .unwrap();
    assert!(hit.is_some());
}

#[tokio::test]
async fn test_routing_while_appends_are_in_flight() {
    let registry = Arc::new(TopicRegistry::new());
    registry.register(Topic::new("marketplace")).await.unwrap();
    registry
        .create_message("marketplace", "seed", "ladder available", None)
        .await
        .unwrap();

    let writer = {
        let registry = registry.clone();
        tokio::spawn(async move {
            for i in 0..100 {
                registry
                    .create_message("marketplace", "writer", format!("ladder offer {}", i), None)
                    .await
                    .unwrap();
            }
        })
    };

    let router = QueryRouter::new(registry.clone());
    for _ in 0..50 {
        // The seed message guarantees a hit; concurrent appends must never
        // produce a torn read or a miss
        let hit = router.route("ladder").await.unwrap().expect("seeded match");
        assert_eq!(hit.topic.name(), "marketplace");
        assert!(!hit.messages.is_empty());
    }

    writer.await.unwrap();
    let topic = registry.find("marketplace").await.unwrap();
    assert_eq!(topic.message_count().await, 101);
}
