//! # Importer
//!
//! Offline loading of the spreadsheet exports into the store. `sheets` parses the
//! CSV exports and `rebuild` replaces both tables with the parsed rows.

pub mod rebuild;
pub mod sheets;

pub use rebuild::{rebuild, ImportSummary};
pub use sheets::{parse_tools_csv, parse_users_csv, read_tools_csv, read_users_csv};

use thiserror::Error;

/// Custom error types for the import process.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Duplicate userID '{0}' in user data")]
    DuplicateUserId(String),
    #[error("User row {0} has an empty userID")]
    MissingUserId(usize),
}
