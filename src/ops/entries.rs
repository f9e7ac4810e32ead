//! Browsing and removing stored entries.

use crate::db::collections::get_collection_by_name;
use crate::db::entries::{self, CollectionFilter};
use crate::db::{Database, JournalEntry};
use crate::errors::{AppResult, DatabaseError};
use tracing::info;

/// Which entries to list, as requested by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntrySelection {
    #[default]
    All,
    Unorganized,
    /// Entries of the collection with this name.
    Collection(String),
}

/// Lists the owner's entries, newest first.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if a named collection does not exist, or
/// another error if the database operation fails.
pub fn list_entries(
    db: &Database,
    owner_id: i64,
    selection: &EntrySelection,
) -> AppResult<Vec<JournalEntry>> {
    let conn = db.get_conn()?;
    let filter = match selection {
        EntrySelection::All => CollectionFilter::All,
        EntrySelection::Unorganized => CollectionFilter::Unorganized,
        EntrySelection::Collection(name) => {
            let collection = get_collection_by_name(&conn, owner_id, name)?.ok_or_else(|| {
                DatabaseError::NotFound(format!("Collection '{}' not found", name))
            })?;
            CollectionFilter::Collection(collection.id)
        }
    };
    entries::list_entries(&conn, owner_id, filter)
}

/// Returns one entry of the owner.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the owner has no entry with this id.
pub fn show_entry(db: &Database, owner_id: i64, entry_id: i64) -> AppResult<JournalEntry> {
    let conn = db.get_conn()?;
    entries::get_entry(&conn, owner_id, entry_id)?
        .ok_or_else(|| DatabaseError::NotFound(format!("Entry {} not found", entry_id)).into())
}

/// Deletes one entry of the owner.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the owner has no entry with this id.
pub fn delete_entry(db: &Database, owner_id: i64, entry_id: i64) -> AppResult<()> {
    let conn = db.get_conn()?;
    entries::delete_entry(&conn, owner_id, entry_id)?;
    info!("Deleted entry {}", entry_id);
    Ok(())
}
