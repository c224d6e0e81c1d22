//! # Catalog Service
//!
//! The four operations the presentation layer calls: `load_users`, `load_tools`,
//! `recommend` and `add_user`. Reads go through a `CachedStore`; `add_user`
//! applies the presence checks before anything reaches the store.

use crate::{
    cache::CachedStore,
    errors::{CatalogError, StoreError, ValidationError},
    providers::db::storage::CatalogStore,
    recommend,
    types::{NewUser, Tool, User},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct CatalogService {
    store: CachedStore,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store: CachedStore::new(store),
        }
    }

    pub async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.store.load_users().await
    }

    pub async fn load_tools(&self) -> Result<Vec<Tool>, StoreError> {
        self.store.load_tools().await
    }

    /// Tools whose `Category` equals `category` exactly, in catalog order.
    pub async fn load_tools_in_category(&self, category: &str) -> Result<Vec<Tool>, StoreError> {
        let tools = self.store.tools().await?;
        Ok(tools
            .iter()
            .filter(|tool| tool.listing.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    pub async fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let users = self.store.users().await?;
        Ok(users.iter().find(|user| user.user_id == user_id).cloned())
    }

    /// Tools the user has not bought. An unknown user yields an empty list, not an error.
    pub async fn recommend(&self, user_id: &str) -> Result<Vec<Tool>, StoreError> {
        let users = self.store.users().await?;
        let tools = self.store.tools().await?;
        let recommendations = recommend::recommend(&users, &tools, user_id);
        info!(
            user_id = %user_id,
            "Recommended {} of {} tools.",
            recommendations.len(),
            tools.len()
        );
        Ok(recommendations)
    }

    /// Registers a user after the presence checks.
    ///
    /// The id must be non-blank and at least one non-empty purchase title must be
    /// given; empty titles are dropped before the list is joined.
    pub async fn add_user(&self, new_user: NewUser) -> Result<User, CatalogError> {
        let user = validate(new_user)?;
        self.store.add_user(&user).await?;
        info!(user_id = %user.user_id, "Added user.");
        Ok(user)
    }

    /// Drops cached reads so the next call goes to the store.
    pub async fn invalidate(&self) {
        self.store.invalidate().await;
    }
}

fn validate(mut new_user: NewUser) -> Result<User, ValidationError> {
    if new_user.user_id.trim().is_empty() {
        warn!("Rejected user without an id.");
        return Err(ValidationError::MissingUserId);
    }
    new_user.previous_purchases.retain(|title| !title.is_empty());
    if new_user.previous_purchases.is_empty() {
        warn!(user_id = %new_user.user_id, "Rejected user without purchases.");
        return Err(ValidationError::MissingPurchases);
    }
    Ok(new_user.into_user())
}
