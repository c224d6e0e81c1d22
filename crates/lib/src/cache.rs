//! # Read-Through Cache
//!
//! `CachedStore` memoizes the two full-table reads of a `CatalogStore`. Writes go
//! through the cache and invalidate it before returning, so a successful
//! `add_user` is always visible to the next `load_users`.

use crate::{
    errors::StoreError,
    providers::db::storage::CatalogStore,
    types::{Tool, User},
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
pub struct CachedStore {
    inner: Arc<dyn CatalogStore>,
    users: RwLock<Option<Arc<Vec<User>>>>,
    tools: RwLock<Option<Arc<Vec<Tool>>>>,
}

impl CachedStore {
    pub fn new(inner: Arc<dyn CatalogStore>) -> Self {
        Self {
            inner,
            users: RwLock::new(None),
            tools: RwLock::new(None),
        }
    }

    /// Discards both cached tables. Call after anything that changes the store
    /// outside `add_user`, such as a rebuild or a bootstrap upload.
    pub async fn invalidate(&self) {
        *self.users.write().await = None;
        *self.tools.write().await = None;
        debug!("Catalog cache invalidated.");
    }

    /// Users, shared with the cache. Failures are never cached.
    pub async fn users(&self) -> Result<Arc<Vec<User>>, StoreError> {
        if let Some(users) = self.users.read().await.as_ref() {
            debug!("Returning cached users.");
            return Ok(users.clone());
        }

        // Hold the write lock across the fetch so a concurrent insert cannot
        // interleave between the read and the cache fill.
        let mut slot = self.users.write().await;
        if let Some(users) = slot.as_ref() {
            return Ok(users.clone());
        }
        debug!("Users not in cache. Fetching from {}.", self.inner.name());
        let users = Arc::new(self.inner.load_users().await?);
        *slot = Some(users.clone());
        Ok(users)
    }

    /// Tools, shared with the cache. Failures are never cached.
    pub async fn tools(&self) -> Result<Arc<Vec<Tool>>, StoreError> {
        if let Some(tools) = self.tools.read().await.as_ref() {
            debug!("Returning cached tools.");
            return Ok(tools.clone());
        }

        let mut slot = self.tools.write().await;
        if let Some(tools) = slot.as_ref() {
            return Ok(tools.clone());
        }
        debug!("Tools not in cache. Fetching from {}.", self.inner.name());
        let tools = Arc::new(self.inner.load_tools().await?);
        *slot = Some(tools.clone());
        Ok(tools)
    }
}

#[async_trait]
impl CatalogStore for CachedStore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users().await?.as_ref().clone())
    }

    async fn load_tools(&self) -> Result<Vec<Tool>, StoreError> {
        Ok(self.tools().await?.as_ref().clone())
    }

    async fn add_user(&self, user: &User) -> Result<(), StoreError> {
        let mut slot = self.users.write().await;
        self.inner.add_user(user).await?;
        *slot = None;
        debug!(user_id = %user.user_id, "Users cache invalidated after insert.");
        Ok(())
    }
}
