//! Managing collections.

use crate::db::collections::{self, Collection};
use crate::db::Database;
use crate::errors::{AppResult, ValidationError};
use chrono::{DateTime, Utc};
use tracing::info;

/// Creates a collection and returns it.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank (`ValidationError::EmptyField`)
/// - The owner already has a collection with this name (`DatabaseError::Conflict`)
/// - Database operations fail
pub fn create_collection(
    db: &Database,
    owner_id: i64,
    name: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> AppResult<Collection> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyField { field: "name" }.into());
    }

    let conn = db.get_conn()?;
    let id = collections::create_collection(&conn, owner_id, name, description, now)?;
    Ok(Collection {
        id,
        owner_id,
        name: name.to_string(),
        description: description.map(str::to_string),
        created_at: now,
        entry_count: 0,
    })
}

/// Lists the owner's collections with their entry counts.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_collections(db: &Database, owner_id: i64) -> AppResult<Vec<Collection>> {
    let conn = db.get_conn()?;
    collections::list_collections(&conn, owner_id)
}

/// Deletes a collection and its entries, returning how many entries went with it.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the owner has no collection with this name.
pub fn delete_collection(db: &Database, owner_id: i64, name: &str) -> AppResult<usize> {
    let conn = db.get_conn()?;
    let removed = collections::delete_collection(&conn, owner_id, name.trim())?;
    info!("Collection '{}' deleted", name.trim());
    Ok(removed)
}
