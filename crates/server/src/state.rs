//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup.

use crate::config::AppConfig;
use std::sync::Arc;
use toolrec::{CatalogService, SqliteStore};
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// The raw store, kept so a bootstrap upload can release its handle.
    pub store: Arc<SqliteStore>,
    /// The cached catalog the read and write handlers go through.
    pub catalog: Arc<CatalogService>,
}

/// Builds the shared application state from the configuration.
///
/// A missing database file is not an error: the server starts, reports the data
/// as unavailable and accepts an upload at `/bootstrap/upload`.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = Arc::new(SqliteStore::open(&config.db_url).await?);
    if store.is_present() {
        info!(db_path = %config.db_url, "Initialized catalog storage (SQLite).");
    } else {
        warn!(db_path = %config.db_url, "Database file not found. Upload one via /bootstrap/upload.");
    }

    let catalog = Arc::new(CatalogService::new(store.clone()));

    Ok(AppState {
        config: Arc::new(config),
        store,
        catalog,
    })
}
