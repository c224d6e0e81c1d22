//! # Catalog Data Model
//!
//! Rows of the `users` and `tools` tables. Serde names match the persisted column
//! names verbatim, so the same structs read spreadsheet exports and serialize to
//! the JSON API without a mapping layer.

use crate::purchases::{join_purchases, parse_purchases};
use serde::{Deserialize, Serialize};

/// A row of the `users` table, fields in persisted column order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "userCategory", default)]
    pub user_category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Free text; the seed data uses Beginner, Intermediate and Expert.
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
    /// Tool titles joined by `|`. `None` and `""` both mean no purchases.
    #[serde(rename = "previousPurchases", default)]
    pub previous_purchases: Option<String>,
    #[serde(rename = "lastPurchaseDate", default)]
    pub last_purchase_date: Option<String>,
    #[serde(rename = "preferredBrand", default)]
    pub preferred_brand: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(rename = "budgetRange", default)]
    pub budget_range: Option<String>,
}

impl User {
    /// The purchased tool titles, in their stored order.
    pub fn purchases(&self) -> Vec<&str> {
        self.previous_purchases
            .as_deref()
            .map(parse_purchases)
            .unwrap_or_default()
    }
}

/// The spreadsheet-facing columns of a tool, everything except the surrogate `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolListing {
    /// Display name. Purchases reference tools by this value; it is not unique.
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Title_URL", default)]
    pub title_url: Option<String>,
    #[serde(rename = "Image", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub onsale: Option<String>,
    #[serde(rename = "add_to_wishlist_URL", default)]
    pub add_to_wishlist_url: Option<String>,
    #[serde(default)]
    pub add_to_wishlist: Option<String>,
    #[serde(rename = "View", default)]
    pub view: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
    #[serde(rename = "Price1", default)]
    pub price1: Option<String>,
    #[serde(rename = "Type_URL", default)]
    pub type_url: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
}

impl ToolListing {
    /// A listing with only a title, the shape most tests need.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// A row of the `tools` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: i64,
    #[serde(flatten)]
    pub listing: ToolListing,
}

impl Tool {
    pub fn title(&self) -> Option<&str> {
        self.listing.title.as_deref()
    }
}

/// The payload for registering a user. Purchases arrive as a list and are
/// serialized with `|` on the way into the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(rename = "userCategory", default)]
    pub user_category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
    #[serde(rename = "previousPurchases", default)]
    pub previous_purchases: Vec<String>,
    #[serde(rename = "lastPurchaseDate", default)]
    pub last_purchase_date: Option<String>,
    #[serde(rename = "preferredBrand", default)]
    pub preferred_brand: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(rename = "budgetRange", default)]
    pub budget_range: Option<String>,
}

impl NewUser {
    /// Converts into a storable row, joining the purchase list.
    ///
    /// Does no validation; see `CatalogService::add_user` for the presence checks.
    pub fn into_user(self) -> User {
        User {
            user_id: self.user_id,
            user_category: self.user_category,
            location: self.location,
            experience_level: self.experience_level,
            previous_purchases: Some(join_purchases(&self.previous_purchases)),
            last_purchase_date: self.last_purchase_date,
            preferred_brand: self.preferred_brand,
            specialization: self.specialization,
            budget_range: self.budget_range,
        }
    }
}
