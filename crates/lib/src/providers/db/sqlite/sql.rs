//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL query strings for the SQLite store. Column names
//! and their order match files produced by the spreadsheet importer, so existing
//! `recommendation.db` files stay readable.

pub const CREATE_TOOLS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS tools (
    id INTEGER PRIMARY KEY,
    "Title" TEXT,
    "Title_URL" TEXT,
    "Image" TEXT,
    "onsale" TEXT,
    "add_to_wishlist_URL" TEXT,
    "add_to_wishlist" TEXT,
    "View" TEXT,
    "Category" TEXT,
    "Price" TEXT,
    "Price1" TEXT,
    "Type_URL" TEXT,
    "Type" TEXT
);
"#;

pub const CREATE_USERS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    "userID" TEXT PRIMARY KEY,
    "userCategory" TEXT,
    "location" TEXT,
    "experienceLevel" TEXT,
    "previousPurchases" TEXT,
    "lastPurchaseDate" TEXT,
    "preferredBrand" TEXT,
    "specialization" TEXT,
    "budgetRange" TEXT
);
"#;

/// Creation statements for every table, in dependency-free order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[CREATE_TOOLS_TABLE_SQL, CREATE_USERS_TABLE_SQL];

/// Drops both tables. Only the importer's rebuild runs these.
pub const DROP_TABLES_SQL: &[&str] = &["DROP TABLE IF EXISTS tools", "DROP TABLE IF EXISTS users"];

pub const SELECT_USERS_SQL: &str = r#"
SELECT "userID", "userCategory", "location", "experienceLevel", "previousPurchases",
       "lastPurchaseDate", "preferredBrand", "specialization", "budgetRange"
FROM users
"#;

pub const SELECT_TOOLS_SQL: &str = r#"
SELECT id, "Title", "Title_URL", "Image", "onsale", "add_to_wishlist_URL", "add_to_wishlist",
       "View", "Category", "Price", "Price1", "Type_URL", "Type"
FROM tools
ORDER BY id
"#;

pub const USER_EXISTS_SQL: &str = r#"SELECT 1 FROM users WHERE "userID" = ?"#;

/// Reads the schema table; fails on files that are not SQLite databases.
pub const SCHEMA_PROBE_SQL: &str = "SELECT name FROM sqlite_master LIMIT 1";

pub const INSERT_USER_SQL: &str = r#"
INSERT INTO users ("userID", "userCategory", "location", "experienceLevel", "previousPurchases",
                   "lastPurchaseDate", "preferredBrand", "specialization", "budgetRange")
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Inserts a tool with an explicit id so a rebuild assigns ids in input order.
pub const INSERT_TOOL_SQL: &str = r#"
INSERT INTO tools (id, "Title", "Title_URL", "Image", "onsale", "add_to_wishlist_URL",
                   "add_to_wishlist", "View", "Category", "Price", "Price1", "Type_URL", "Type")
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;
