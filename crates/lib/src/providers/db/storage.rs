use crate::{
    errors::StoreError,
    types::{Tool, User},
};
use async_trait::async_trait;
use std::fmt::Debug;

/// Durable storage for the catalog.
///
/// Exactly two read accessors and one write accessor are exposed; there is no
/// update or delete. Implementations report a missing or unreadable backing store
/// as `StoreError::DataUnavailable` so callers can render a placeholder state.
#[async_trait]
pub trait CatalogStore: Send + Sync + Debug {
    /// Returns the name of the storage backend (e.g., "SQLite").
    fn name(&self) -> &str;

    /// Every row of the `users` table, without filtering or pagination.
    async fn load_users(&self) -> Result<Vec<User>, StoreError>;

    /// Every row of the `tools` table, full width, in `id` order.
    async fn load_tools(&self) -> Result<Vec<Tool>, StoreError>;

    /// Inserts one user.
    ///
    /// Fails with `StoreError::DuplicateKey` when the `userID` already exists, leaving
    /// the table untouched. Callers are expected to have checked that the id is
    /// non-empty and at least one purchase is present.
    async fn add_user(&self, user: &User) -> Result<(), StoreError>;
}
