//! # Destructive Rebuild
//!
//! Replaces both tables with the given datasets. Running it twice with the same
//! input leaves the same database behind, so it is safe to repeat, but it is never
//! run implicitly: callers invoke it from the offline `import` command.

use super::ImportError;
use crate::{
    providers::db::sqlite::{sql, tool_params, user_params},
    types::{ToolListing, User},
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};
use turso::{Connection, Database};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub tools_imported: usize,
    pub users_imported: usize,
}

/// Rejects user data that would violate the `userID` key before anything is dropped.
fn check_user_ids(users: &[User]) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for (row, user) in users.iter().enumerate() {
        if user.user_id.is_empty() {
            return Err(ImportError::MissingUserId(row + 1));
        }
        if !seen.insert(user.user_id.as_str()) {
            return Err(ImportError::DuplicateUserId(user.user_id.clone()));
        }
    }
    Ok(())
}

/// Drops and recreates `tools` and `users`, then bulk-loads both datasets in order.
///
/// Tool ids are assigned 1..=n in input order. The drops, creates and inserts run
/// in one transaction; on any failure it is rolled back and the previous tables
/// are left as they were.
pub async fn rebuild(
    db: &Database,
    tools: &[ToolListing],
    users: &[User],
) -> Result<ImportSummary, ImportError> {
    check_user_ids(users)?;
    replace_in_transaction(db, tools, users).await
}

async fn replace_in_transaction(
    db: &Database,
    tools: &[ToolListing],
    users: &[User],
) -> Result<ImportSummary, ImportError> {
    let conn = db.connect()?;
    conn.execute("BEGIN TRANSACTION", ()).await?;

    match replace_tables(&conn, tools, users).await {
        Ok(summary) => {
            conn.execute("COMMIT", ()).await?;
            info!(
                "Transaction committed. Imported {} tools and {} users.",
                summary.tools_imported, summary.users_imported
            );
            Ok(summary)
        }
        Err(e) => {
            warn!("Rebuild failed: {e}. Rolling back transaction.");
            conn.execute("ROLLBACK", ()).await?;
            Err(e)
        }
    }
}

async fn replace_tables(
    conn: &Connection,
    tools: &[ToolListing],
    users: &[User],
) -> Result<ImportSummary, ImportError> {
    for statement in sql::DROP_TABLES_SQL {
        conn.execute(statement, ()).await?;
    }
    for statement in sql::ALL_TABLE_CREATION_SQL {
        conn.execute(statement, ()).await?;
    }
    info!("Recreated tables 'tools' and 'users'.");

    let mut tool_stmt = conn.prepare(sql::INSERT_TOOL_SQL).await?;
    for (index, listing) in tools.iter().enumerate() {
        tool_stmt
            .execute(tool_params(index as i64 + 1, listing))
            .await?;
    }

    let mut user_stmt = conn.prepare(sql::INSERT_USER_SQL).await?;
    for user in users {
        if let Err(e) = user_stmt.execute(user_params(user)).await {
            warn!("Failed to insert user '{}': {e:?}", user.user_id);
            return Err(ImportError::Database(e));
        }
    }

    Ok(ImportSummary {
        tools_imported: tools.len(),
        users_imported: users.len(),
    })
}
