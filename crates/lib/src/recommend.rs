//! # Purchase-Exclusion Recommender
//!
//! A user is recommended every tool they have not bought. Matching is by exact,
//! case-sensitive `Title` equality, so a purchased title removes every tool that
//! shares it. Catalog order is preserved.

use crate::types::{Tool, User};
use std::collections::HashSet;

/// Filters `tools` down to those whose title is not among the user's purchases.
///
/// Tools without a title are never excluded.
pub fn recommend_for(user: &User, tools: &[Tool]) -> Vec<Tool> {
    let purchased: HashSet<&str> = user.purchases().into_iter().collect();
    tools
        .iter()
        .filter(|tool| !tool.title().is_some_and(|title| purchased.contains(title)))
        .cloned()
        .collect()
}

/// Looks up `user_id` and applies `recommend_for`. An unknown user gets nothing.
pub fn recommend(users: &[User], tools: &[Tool], user_id: &str) -> Vec<Tool> {
    users
        .iter()
        .find(|user| user.user_id == user_id)
        .map(|user| recommend_for(user, tools))
        .unwrap_or_default()
}
