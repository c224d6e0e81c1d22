//! # Shared Test Fixtures
//!
//! A small surgical-tool catalog and helpers to materialise it in an in-memory
//! or on-disk database, used by the server and CLI test suites.

use anyhow::Result;
use std::path::Path;
use toolrec::{ingest::rebuild, SqliteStore, ToolListing, User};

// --- Fixture Data ---

/// Four tools; "Clamp" appears twice to exercise title-based exclusion.
pub fn fixture_tools() -> Vec<ToolListing> {
    vec![
        tool("Scalpel", "Cutting", "12.50"),
        tool("Clamp", "Holding", "8.00"),
        tool("Retractor", "Holding", "21.00"),
        tool("Clamp", "Holding", "9.50"),
    ]
}

/// Three users: one with a purchase, one without, one with two.
pub fn fixture_users() -> Vec<User> {
    vec![
        user("U1", "Expert", "Clamp"),
        user("U2", "Beginner", ""),
        user("U3", "Intermediate", "Scalpel|Retractor"),
    ]
}

fn tool(title: &str, category: &str, price: &str) -> ToolListing {
    ToolListing {
        title: Some(title.to_string()),
        title_url: Some(format!(
            "https://shop.example/{}",
            title.to_lowercase()
        )),
        category: Some(category.to_string()),
        price: Some(price.to_string()),
        ..Default::default()
    }
}

fn user(id: &str, level: &str, purchases: &str) -> User {
    User {
        user_id: id.to_string(),
        user_category: Some("Surgeon".to_string()),
        experience_level: Some(level.to_string()),
        previous_purchases: Some(purchases.to_string()),
        last_purchase_date: Some("2024-01-15 00:00:00".to_string()),
        ..Default::default()
    }
}

// --- Test Setup ---

/// A helper struct to manage database creation for each test.
pub struct TestSetup {
    pub store: SqliteStore,
}

impl TestSetup {
    /// Creates a new, isolated in-memory database seeded with the fixtures.
    pub async fn new() -> Result<Self> {
        let store = SqliteStore::open(":memory:").await?;
        let db = store.database().await?;
        rebuild(&db, &fixture_tools(), &fixture_users()).await?;
        Ok(Self { store })
    }
}

/// Writes the fixture catalog to a database file at `path`, creating it.
///
/// The WAL is checkpointed before returning so the main file is complete on its
/// own and can be copied or uploaded byte for byte.
pub async fn write_fixture_database(path: &Path) -> Result<()> {
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("database path is not valid UTF-8"))?;
    let db = turso::Builder::new_local(path_str).build().await?;
    rebuild(&db, &fixture_tools(), &fixture_users()).await?;
    let conn = db.connect()?;
    conn.query("PRAGMA wal_checkpoint(TRUNCATE);", ()).await?;
    Ok(())
}

/// Builds the fixture database under `dir` and returns its bytes.
pub async fn fixture_database_bytes(dir: &Path) -> Result<Vec<u8>> {
    let path = dir.join("fixture-upload.db");
    write_fixture_database(&path).await?;
    Ok(std::fs::read(&path)?)
}
