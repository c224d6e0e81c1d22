use crate::{
    bootstrap::database_present,
    constants::IN_MEMORY_DB,
    errors::StoreError,
    providers::db::storage::CatalogStore,
    types::{Tool, ToolListing, User},
};
use async_trait::async_trait;
use std::{
    fmt::{self, Debug},
    path::Path,
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use turso::{Connection, Database, Row, Value as TursoValue};

pub mod sql;

/// A catalog store backed by a local SQLite file through Turso.
///
/// The store never creates a missing database file: until the file exists every
/// operation fails with `StoreError::DataUnavailable`. Once it appears (for example
/// after a bootstrap upload) the handle is opened on first use. Clones share the
/// same handle, so a clone of an in-memory store sees the same data.
#[derive(Clone)]
pub struct SqliteStore {
    db_path: String,
    db: Arc<RwLock<Option<Database>>>,
}

impl SqliteStore {
    /// Creates a store for `db_path`. Use ":memory:" for an isolated in-memory database.
    ///
    /// An existing file or ":memory:" is opened immediately; a missing file is left
    /// alone and opened lazily.
    pub async fn open(db_path: &str) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.to_string(),
            db: Arc::new(RwLock::new(None)),
        };
        if store.is_in_memory() {
            let db = Self::build(db_path).await?;
            *store.db.write().await = Some(db);
        } else if store.is_present() {
            match Self::build(db_path).await {
                Ok(db) => *store.db.write().await = Some(db),
                Err(e) => warn!(db_path = %db_path, "Database file could not be opened: {e}"),
            }
        } else {
            warn!(db_path = %db_path, "Database file not found; store is unavailable until it is provided.");
        }
        Ok(store)
    }

    async fn build(db_path: &str) -> Result<Database, StoreError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| StoreError::StorageConnection(e.to_string()))?;

        // Use `query` for PRAGMA statements that return a value to avoid "unexpected row" errors.
        let conn = db
            .connect()
            .map_err(|e| StoreError::StorageConnection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| StoreError::StorageConnection(e.to_string()))?;

        // Reading the schema page rejects files that are not SQLite databases.
        let mut rows = conn
            .query(sql::SCHEMA_PROBE_SQL, ())
            .await
            .map_err(|e| StoreError::StorageConnection(e.to_string()))?;
        rows.next()
            .await
            .map_err(|e| StoreError::StorageConnection(e.to_string()))?;

        info!(db_path = %db_path, "Opened SQLite catalog database.");
        Ok(db)
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }

    /// Whether the backing file is present. Always true for in-memory stores.
    pub fn is_present(&self) -> bool {
        self.is_in_memory() || database_present(Path::new(&self.db_path))
    }

    /// Drops the cached handle so the next operation re-opens the file.
    pub async fn reset(&self) {
        *self.db.write().await = None;
        debug!(db_path = %self.db_path, "Released database handle.");
    }

    /// Returns the shared database handle, opening it if the file has appeared.
    pub async fn database(&self) -> Result<Database, StoreError> {
        if !self.is_present() {
            return Err(StoreError::DataUnavailable(format!(
                "database file '{}' not found",
                self.db_path
            )));
        }
        if let Some(db) = self.db.read().await.as_ref() {
            return Ok(db.clone());
        }

        let mut slot = self.db.write().await;
        if let Some(db) = slot.as_ref() {
            return Ok(db.clone());
        }
        // A file that is present but cannot be opened is as good as missing.
        let db = Self::build(&self.db_path).await.map_err(|e| {
            StoreError::DataUnavailable(format!(
                "database file '{}' could not be read: {e}",
                self.db_path
            ))
        })?;
        *slot = Some(db.clone());
        Ok(db)
    }

    async fn connect(&self) -> Result<Connection, StoreError> {
        self.database()
            .await?
            .connect()
            .map_err(|e| StoreError::StorageConnection(e.to_string()))
    }

    /// Creates the `users` and `tools` tables if they do not exist.
    /// Idempotent and non-destructive; existing rows are kept.
    pub async fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect().await?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        Ok(())
    }

    async fn user_exists(conn: &Connection, user_id: &str) -> Result<bool, StoreError> {
        let mut rows = conn
            .query(sql::USER_EXISTS_SQL, vec![TursoValue::Text(user_id.to_string())])
            .await
            .map_err(read_error)?;
        Ok(rows.next().await.map_err(read_error)?.is_some())
    }
}

impl Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

/// Maps a read failure. A table that is missing or cannot be read is unavailable
/// data, not a server fault.
fn read_error(err: turso::Error) -> StoreError {
    StoreError::DataUnavailable(err.to_string())
}

fn opt_text(value: &Option<String>) -> TursoValue {
    match value {
        Some(s) => TursoValue::Text(s.clone()),
        None => TursoValue::Null,
    }
}

/// Reads a nullable column as text. Spreadsheet imports may have stored numbers
/// in TEXT columns, so numeric values are rendered rather than rejected.
fn text_at(row: &Row, index: usize) -> Result<Option<String>, StoreError> {
    Ok(match row.get_value(index).map_err(read_error)? {
        TursoValue::Null => None,
        TursoValue::Text(s) => Some(s),
        TursoValue::Integer(i) => Some(i.to_string()),
        TursoValue::Real(f) => Some(f.to_string()),
        TursoValue::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    })
}

/// Positional parameters for `sql::INSERT_USER_SQL`.
pub(crate) fn user_params(user: &User) -> Vec<TursoValue> {
    vec![
        TursoValue::Text(user.user_id.clone()),
        opt_text(&user.user_category),
        opt_text(&user.location),
        opt_text(&user.experience_level),
        opt_text(&user.previous_purchases),
        opt_text(&user.last_purchase_date),
        opt_text(&user.preferred_brand),
        opt_text(&user.specialization),
        opt_text(&user.budget_range),
    ]
}

/// Positional parameters for `sql::INSERT_TOOL_SQL`.
pub(crate) fn tool_params(id: i64, listing: &ToolListing) -> Vec<TursoValue> {
    vec![
        TursoValue::Integer(id),
        opt_text(&listing.title),
        opt_text(&listing.title_url),
        opt_text(&listing.image),
        opt_text(&listing.onsale),
        opt_text(&listing.add_to_wishlist_url),
        opt_text(&listing.add_to_wishlist),
        opt_text(&listing.view),
        opt_text(&listing.category),
        opt_text(&listing.price),
        opt_text(&listing.price1),
        opt_text(&listing.type_url),
        opt_text(&listing.kind),
    ]
}

fn user_from_row(row: &Row) -> Result<User, StoreError> {
    Ok(User {
        user_id: text_at(row, 0)?.unwrap_or_default(),
        user_category: text_at(row, 1)?,
        location: text_at(row, 2)?,
        experience_level: text_at(row, 3)?,
        previous_purchases: text_at(row, 4)?,
        last_purchase_date: text_at(row, 5)?,
        preferred_brand: text_at(row, 6)?,
        specialization: text_at(row, 7)?,
        budget_range: text_at(row, 8)?,
    })
}

fn tool_from_row(row: &Row) -> Result<Tool, StoreError> {
    let id = match row.get_value(0).map_err(read_error)? {
        TursoValue::Integer(i) => i,
        other => {
            return Err(StoreError::StorageOperationFailed(format!(
                "tool id is not an integer: {other:?}"
            )))
        }
    };
    Ok(Tool {
        id,
        listing: ToolListing {
            title: text_at(row, 1)?,
            title_url: text_at(row, 2)?,
            image: text_at(row, 3)?,
            onsale: text_at(row, 4)?,
            add_to_wishlist_url: text_at(row, 5)?,
            add_to_wishlist: text_at(row, 6)?,
            view: text_at(row, 7)?,
            category: text_at(row, 8)?,
            price: text_at(row, 9)?,
            price1: text_at(row, 10)?,
            type_url: text_at(row, 11)?,
            kind: text_at(row, 12)?,
        },
    })
}

#[async_trait]
impl CatalogStore for SqliteStore {
    fn name(&self) -> &str {
        "SQLite"
    }

    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        debug!(db_path = %self.db_path, "--> Loading users");
        let conn = self.connect().await?;
        let mut rows = conn
            .query(sql::SELECT_USERS_SQL, ())
            .await
            .map_err(read_error)?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await.map_err(read_error)? {
            users.push(user_from_row(&row)?);
        }
        debug!("<-- Loaded {} users", users.len());
        Ok(users)
    }

    async fn load_tools(&self) -> Result<Vec<Tool>, StoreError> {
        debug!(db_path = %self.db_path, "--> Loading tools");
        let conn = self.connect().await?;
        let mut rows = conn
            .query(sql::SELECT_TOOLS_SQL, ())
            .await
            .map_err(read_error)?;

        let mut tools = Vec::new();
        while let Some(row) = rows.next().await.map_err(read_error)? {
            tools.push(tool_from_row(&row)?);
        }
        debug!("<-- Loaded {} tools", tools.len());
        Ok(tools)
    }

    async fn add_user(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.connect().await?;

        if Self::user_exists(&conn, &user.user_id).await? {
            warn!(user_id = %user.user_id, "Rejected insert of existing user id.");
            return Err(StoreError::DuplicateKey(user.user_id.clone()));
        }

        conn.execute(sql::INSERT_USER_SQL, user_params(user))
            .await
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("UNIQUE constraint failed") {
                    StoreError::DuplicateKey(user.user_id.clone())
                } else {
                    StoreError::StorageOperationFailed(message)
                }
            })?;

        info!(user_id = %user.user_id, "Inserted user.");
        Ok(())
    }
}
