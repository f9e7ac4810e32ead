//! Collection CRUD operations.
//!
//! A collection is a named folder of entries. Names are unique per owner, and
//! deleting a collection deletes the entries filed in it.

use crate::db::{format_timestamp, parse_timestamp};
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use serde::Serialize;
use tracing::{debug, info};

/// A stored collection, with the number of entries filed in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub entry_count: usize,
}

const COLLECTION_SELECT: &str = r#"
    SELECT c.id, c.user_id, c.name, c.description, c.created_at,
           (SELECT COUNT(*) FROM entries e WHERE e.collection_id = c.id)
    FROM collections c
"#;

fn row_to_collection(row: &Row<'_>) -> rusqlite::Result<Collection> {
    Ok(Collection {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: parse_timestamp(4, &row.get::<_, String>(4)?)?,
        entry_count: row.get::<_, i64>(5)? as usize,
    })
}

/// Creates a collection and returns its id.
///
/// # Errors
///
/// Returns `DatabaseError::Conflict` if the owner already has a collection with
/// this name, or another database error if the insert fails.
pub fn create_collection(
    conn: &Connection,
    owner_id: i64,
    name: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<i64> {
    debug!("Creating collection '{}' for owner {}", name, owner_id);

    let result = conn.execute(
        "INSERT INTO collections (user_id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![owner_id, name, description, format_timestamp(now)],
    );

    match result {
        Ok(_) => {
            let id = conn.last_insert_rowid();
            info!("Collection created with id {}", id);
            Ok(id)
        }
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Err(DatabaseError::Conflict(format!("collection '{}'", name)).into())
        }
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Lists the owner's collections in creation order.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_collections(conn: &Connection, owner_id: i64) -> AppResult<Vec<Collection>> {
    debug!("Listing collections for owner {}", owner_id);

    let sql = format!("{} WHERE c.user_id = ?1 ORDER BY c.created_at ASC, c.id ASC", COLLECTION_SELECT);
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let collections = stmt
        .query_map(params![owner_id], row_to_collection)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(collections)
}

/// Retrieves a collection by name.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if the owner has no collection with this name.
pub fn get_collection_by_name(
    conn: &Connection,
    owner_id: i64,
    name: &str,
) -> AppResult<Option<Collection>> {
    let sql = format!("{} WHERE c.user_id = ?1 AND c.name = ?2", COLLECTION_SELECT);
    let collection = conn
        .query_row(&sql, params![owner_id, name], row_to_collection)
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(collection)
}

/// Deletes a collection together with its entries.
///
/// Returns the number of entries that were removed.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the owner has no collection with this name.
pub fn delete_collection(conn: &Connection, owner_id: i64, name: &str) -> AppResult<usize> {
    let collection = get_collection_by_name(conn, owner_id, name)?
        .ok_or_else(|| DatabaseError::NotFound(format!("Collection '{}' not found", name)))?;

    let tx = conn.unchecked_transaction().map_err(DatabaseError::Sqlite)?;
    let removed = tx
        .execute(
            "DELETE FROM entries WHERE collection_id = ?1 AND user_id = ?2",
            params![collection.id, owner_id],
        )
        .map_err(DatabaseError::Sqlite)?;
    tx.execute(
        "DELETE FROM collections WHERE id = ?1",
        params![collection.id],
    )
    .map_err(DatabaseError::Sqlite)?;
    tx.commit().map_err(DatabaseError::Sqlite)?;

    info!(
        "Deleted collection {} and {} entries",
        collection.id, removed
    );
    Ok(removed)
}
