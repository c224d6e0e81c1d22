//! # Catalog Service Tests
//!
//! Covers the four operations the presentation layer relies on, running through
//! the read-through cache on top of a seeded in-memory store.

mod common;

use crate::common::{seeded_store, setup_tracing};
use std::sync::Arc;
use toolrec::{
    CatalogError, CatalogService, NewUser, SqliteStore, StoreError, Tool, ValidationError,
};

async fn seeded_service() -> anyhow::Result<CatalogService> {
    let store = seeded_store().await?;
    Ok(CatalogService::new(Arc::new(store)))
}

fn titles(tools: &[Tool]) -> Vec<&str> {
    tools.iter().filter_map(Tool::title).collect()
}

fn new_user(id: &str, purchases: &[&str]) -> NewUser {
    NewUser {
        user_id: id.to_string(),
        previous_purchases: purchases.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_recommend_excludes_purchases() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;

    let recs = service.recommend("U1").await?;

    assert_eq!(titles(&recs), ["Scalpel", "Retractor"]);
    Ok(())
}

#[tokio::test]
async fn test_recommend_empty_purchases_returns_catalog() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;

    let recs = service.recommend("U2").await?;

    assert_eq!(recs, service.load_tools().await?);
    Ok(())
}

#[tokio::test]
async fn test_recommend_unknown_user_is_empty() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;

    assert!(service.recommend("nobody").await?.is_empty());
    assert!(service.recommend("").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_add_user_is_visible_through_cache() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;
    // Warm the cache so a stale read would be observable.
    assert_eq!(service.load_users().await?.len(), 3);

    let stored = service.add_user(new_user("U4", &["ToolA", "ToolB"])).await?;
    assert_eq!(stored.previous_purchases.as_deref(), Some("ToolA|ToolB"));

    let users = service.load_users().await?;
    assert_eq!(users.len(), 4);
    let found = service.find_user("U4").await?.expect("U4 should exist");
    assert_eq!(found.previous_purchases.as_deref(), Some("ToolA|ToolB"));

    // The new user's purchases do not name catalog titles, so nothing is excluded.
    assert_eq!(service.recommend("U4").await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_add_duplicate_user_leaves_users_unchanged() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;
    let before = service.load_users().await?;

    let err = service
        .add_user(new_user("U1", &["Clamp"]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CatalogError::Store(StoreError::DuplicateKey("U1".to_string()))
    );
    assert_eq!(service.load_users().await?, before);
    Ok(())
}

#[tokio::test]
async fn test_add_user_presence_checks() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;

    let missing_id = service.add_user(new_user("   ", &["Clamp"])).await;
    assert_eq!(
        missing_id.unwrap_err(),
        CatalogError::Validation(ValidationError::MissingUserId)
    );

    let no_purchases = service.add_user(new_user("U5", &[])).await;
    assert_eq!(
        no_purchases.unwrap_err(),
        CatalogError::Validation(ValidationError::MissingPurchases)
    );

    let blank_purchases = service.add_user(new_user("U5", &["", ""])).await;
    assert_eq!(
        blank_purchases.unwrap_err(),
        CatalogError::Validation(ValidationError::MissingPurchases)
    );

    assert_eq!(service.load_users().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_load_tools_in_category() -> anyhow::Result<()> {
    setup_tracing();
    let service = seeded_service().await?;

    let holding = service.load_tools_in_category("Holding").await?;
    assert_eq!(titles(&holding), ["Clamp", "Retractor"]);
    assert!(service.load_tools_in_category("holding").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unavailable_store_is_reported_not_cached() -> anyhow::Result<()> {
    setup_tracing();
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("missing.db");
    let store = SqliteStore::open(db_path.to_str().unwrap()).await?;
    let service = CatalogService::new(Arc::new(store));

    assert!(service.load_users().await.unwrap_err().is_unavailable());
    assert!(service.recommend("U1").await.unwrap_err().is_unavailable());
    let err = service.add_user(new_user("U1", &["Clamp"])).await.unwrap_err();
    assert!(matches!(err, CatalogError::Store(StoreError::DataUnavailable(_))));
    Ok(())
}
