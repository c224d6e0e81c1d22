//! # Shared Constants
//!
//! Table names and default paths shared by the library, the server and the CLI.

/// The default path of the recommender database file.
pub const DEFAULT_DB_FILE: &str = "recommendation.db";

/// The path that selects an isolated in-memory database.
pub const IN_MEMORY_DB: &str = ":memory:";

pub const USERS_TABLE: &str = "users";

pub const TOOLS_TABLE: &str = "tools";
