//! Owner identities.
//!
//! Every entry, collection and draft belongs to a row in `users`. The external id
//! is whatever identity the caller authenticated with; this crate only maps it to
//! a numeric owner id.

use crate::db::format_timestamp;
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

/// Returns the owner id for `external_id`, creating the owner if needed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn get_or_create_user(conn: &Connection, external_id: &str, now: DateTime<Utc>) -> AppResult<i64> {
    if let Some(id) = find_user(conn, external_id)? {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO users (external_id, created_at) VALUES (?1, ?2)",
        params![external_id, format_timestamp(now)],
    )
    .map_err(DatabaseError::Sqlite)?;

    let id = conn.last_insert_rowid();
    info!("Created owner {}", id);
    Ok(id)
}

/// Looks up the owner id for `external_id`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if the owner does not exist.
pub fn find_user(conn: &Connection, external_id: &str) -> AppResult<Option<i64>> {
    debug!("Looking up owner by external id");

    let id = conn
        .query_row(
            "SELECT id FROM users WHERE external_id = ?1",
            params![external_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(id)
}

/// Checks whether an owner id exists.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn user_exists(conn: &Connection, owner_id: i64) -> AppResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![owner_id],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    Ok(exists)
}
