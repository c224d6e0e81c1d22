//! Storage backends for the `users` and `tools` tables.

pub mod sqlite;
pub mod storage;
