//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `toolrec-server`.

pub mod bootstrap;
pub mod catalog;
pub mod general;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use bootstrap::*;
pub use catalog::*;
pub use general::*;

// Shared items used by multiple handler modules.
use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, TableResponse, ToolFilter},
};
