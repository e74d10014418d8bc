//! Integration tests for topic registration and message creation

use std::sync::Arc;

use locavox_core::prelude::*;

#[tokio::test]
async fn test_topics_returned_in_registration_order() {
    let registry = TopicRegistry::new();
    let names = ["marketplace", "chat", "events", "lost-and-found", "rides"];
    for name in names {
        registry.register(Topic::new(name)).await.unwrap();
    }

    let listed: Vec<_> = registry
        .topics()
        .await
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(listed, names);
}

#[tokio::test]
async fn test_duplicate_registration_leaves_registry_unchanged() {
    let registry = TopicRegistry::new();
    let original = registry
        .register(Topic::new("chat").with_description("Neighborhood Hub Chat"))
        .await
        .unwrap();

    let result = registry
        .register(Topic::new("chat").with_description("a different chat"))
        .await;
    assert!(matches!(result, Err(LocavoxError::DuplicateTopic(_))));

    assert_eq!(registry.len().await, 1);
    let survivor = registry.find("chat").await.unwrap();
    assert!(Arc::ptr_eq(&original, &survivor));
    assert_eq!(survivor.description(), "Neighborhood Hub Chat");
}

#[tokio::test]
async fn test_append_keeps_prior_messages_in_order() {
    let registry = TopicRegistry::new();
    registry.register(Topic::new("chat")).await.unwrap();

    let mut expected = Vec::new();
    for i in 0..4 {
        let message = registry
            .create_message("chat", "user-1", format!("post {}", i), None)
            .await
            .unwrap();
        expected.push(message);
    }

    let topic = registry.find("chat").await.unwrap();
    let messages = topic.messages().await;
    assert_eq!(messages, expected);
    assert_eq!(messages.last().unwrap().content, "post 3");
}

#[tokio::test]
async fn test_from_config_seeds_default_topics() {
    let config = LocavoxConfig::default();
    let registry = TopicRegistry::from_config(&config).await.unwrap();

    let names: Vec<_> = registry
        .topics()
        .await
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(names, vec!["marketplace", "chat"]);

    let marketplace = registry.find("marketplace").await.unwrap();
    assert_eq!(marketplace.description(), "Community Task Marketplace");
    assert_eq!(registry.message_limit(), Some(100));
}

#[tokio::test]
async fn test_concurrent_registration_is_consistent() {
    let registry = Arc::new(TopicRegistry::new());

    let mut handles = Vec::new();
    for i in 0..16 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            registry.register(Topic::new(format!("topic-{}", i))).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(registry.len().await, 16);

    // Registration order, once observed, is stable
    let first: Vec<_> = registry
        .topics()
        .await
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    let second: Vec<_> = registry
        .topics()
        .await
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(first, second);

    // Every topic is findable by exact name
    for i in 0..16 {
        registry.find(&format!("topic-{}", i)).await.unwrap();
    }
}

#[tokio::test]
async fn test_concurrent_appends_never_lose_messages() {
    let registry = Arc::new(TopicRegistry::new());
    registry.register(Topic::new("chat")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let registry = registry.clone();
        handles.push(tokio::spawn(async move {
            for j in 0..25 {
                registry
                    .create_message("chat", format!("user-{}", i), format!("post {}", j), None)
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let topic = registry.find("chat").await.unwrap();
    assert_eq!(topic.message_count().await, 200);
    for i in 0..8 {
        assert_eq!(registry.count_user_messages(&format!("user-{}", i)).await, 25);
    }
}

#[tokio::test]
async fn test_clear_empties_the_registry() {
    let registry = TopicRegistry::new();
    registry.register(Topic::new("a")).await.unwrap();
    registry.register(Topic::new("b")).await.unwrap();

    registry.clear().await;
    assert!(registry.is_empty().await);

    // Names are free again after clearing
    registry.register(Topic::new("a")).await.unwrap();
    assert_eq!(registry.len().await, 1);
}
