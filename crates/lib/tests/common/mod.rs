#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Tracing setup and a small seeded catalog shared by the integration tests.

use dotenvy::dotenv;
use std::sync::Once;
use toolrec::{ingest::rebuild, SqliteStore, ToolListing, User};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn listing(title: &str, category: &str) -> ToolListing {
    ToolListing {
        title: Some(title.to_string()),
        category: Some(category.to_string()),
        ..Default::default()
    }
}

pub fn user(id: &str, purchases: &str) -> User {
    User {
        user_id: id.to_string(),
        experience_level: Some("Intermediate".to_string()),
        previous_purchases: Some(purchases.to_string()),
        ..Default::default()
    }
}

pub fn seed_tools() -> Vec<ToolListing> {
    vec![
        listing("Scalpel", "Cutting"),
        listing("Clamp", "Holding"),
        listing("Retractor", "Holding"),
    ]
}

pub fn seed_users() -> Vec<User> {
    vec![user("U1", "Clamp"), user("U2", ""), user("U3", "Scalpel|Retractor")]
}

/// An in-memory store rebuilt with `seed_tools` and `seed_users`.
pub async fn seeded_store() -> anyhow::Result<SqliteStore> {
    let store = SqliteStore::open(":memory:").await?;
    let db = store.database().await?;
    rebuild(&db, &seed_tools(), &seed_users()).await?;
    Ok(store)
}
