//! # Medical Tool Recommender
//!
//! This crate provides the catalog over a two-table SQLite database (`users`,
//! `tools`): a store, a read-through cache, the purchase-exclusion recommender,
//! the service the presentation layer calls, and the offline spreadsheet importer.

pub mod bootstrap;
pub mod cache;
pub mod catalog;
pub mod constants;
pub mod errors;
pub mod ingest;
pub mod providers;
pub mod purchases;
pub mod recommend;
pub mod types;

pub use cache::CachedStore;
pub use catalog::CatalogService;
pub use errors::{CatalogError, StoreError, ValidationError};
pub use providers::db::{sqlite::SqliteStore, storage::CatalogStore};
pub use types::{NewUser, Tool, ToolListing, User};
