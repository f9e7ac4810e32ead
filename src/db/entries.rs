//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, listing and deleting
//! journal entries, plus the time-ranged read used by the mood analytics.

use crate::db::{format_timestamp, parse_timestamp};
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use tracing::debug;

/// A stored journal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub id: i64,
    pub owner_id: i64,
    pub collection_id: Option<i64>,
    pub title: String,
    pub content: String,
    /// Identifier of the mood from the mood table.
    pub mood_name: String,
    /// Score of the mood at the time the entry was written (1..=10).
    pub mood_score: u8,
    pub mood_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields of an entry that is about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub mood_name: String,
    pub mood_score: u8,
    pub mood_image_url: Option<String>,
    pub collection_id: Option<i64>,
}

/// Which entries a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFilter {
    /// Every entry of the owner.
    All,
    /// Entries that are not part of any collection.
    Unorganized,
    /// Entries of one collection.
    Collection(i64),
}

const ENTRY_COLUMNS: &str =
    "id, user_id, collection_id, title, content, mood, mood_score, mood_image_url, created_at";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    Ok(JournalEntry {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        collection_id: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        mood_name: row.get(5)?,
        mood_score: row.get(6)?,
        mood_image_url: row.get(7)?,
        created_at: parse_timestamp(8, &row.get::<_, String>(8)?)?,
    })
}

/// Inserts a new entry for `owner_id` and returns its id.
///
/// # Errors
///
/// Returns an error if the database operation fails, e.g. when the collection
/// does not exist.
pub fn insert_entry(
    conn: &Connection,
    owner_id: i64,
    entry: &NewEntry,
    created_at: DateTime<Utc>,
) -> AppResult<i64> {
    debug!(
        "Inserting entry for owner {} with mood {}",
        owner_id, entry.mood_name
    );

    conn.execute(
        r#"
        INSERT INTO entries (user_id, collection_id, title, content, mood, mood_score, mood_image_url, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            owner_id,
            entry.collection_id,
            entry.title,
            entry.content,
            entry.mood_name,
            entry.mood_score,
            entry.mood_image_url,
            format_timestamp(created_at),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    let entry_id = conn.last_insert_rowid();
    debug!("Entry inserted with id {}", entry_id);
    Ok(entry_id)
}

/// Retrieves one entry of `owner_id`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no such entry belongs to the owner.
pub fn get_entry(conn: &Connection, owner_id: i64, entry_id: i64) -> AppResult<Option<JournalEntry>> {
    debug!("Getting entry {} for owner {}", entry_id, owner_id);

    let sql = format!(
        "SELECT {} FROM entries WHERE id = ?1 AND user_id = ?2",
        ENTRY_COLUMNS
    );
    let entry = conn
        .query_row(&sql, params![entry_id, owner_id], row_to_entry)
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entry)
}

/// Lists entries of `owner_id`, newest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(
    conn: &Connection,
    owner_id: i64,
    filter: CollectionFilter,
) -> AppResult<Vec<JournalEntry>> {
    debug!("Listing entries for owner {} ({:?})", owner_id, filter);

    let (clause, collection_id) = match filter {
        CollectionFilter::All => ("", None),
        CollectionFilter::Unorganized => ("AND collection_id IS NULL", None),
        CollectionFilter::Collection(id) => ("AND collection_id = ?2", Some(id)),
    };
    let sql = format!(
        "SELECT {} FROM entries WHERE user_id = ?1 {} ORDER BY created_at DESC, id DESC",
        ENTRY_COLUMNS, clause
    );

    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let rows = match collection_id {
        Some(id) => stmt.query_map(params![owner_id, id], row_to_entry),
        None => stmt.query_map(params![owner_id], row_to_entry),
    }
    .map_err(DatabaseError::Sqlite)?;

    let entries = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}

/// Fetches entries of `owner_id` created at or after `since`, oldest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn fetch_entries_since(
    conn: &Connection,
    owner_id: i64,
    since: DateTime<Utc>,
) -> AppResult<Vec<JournalEntry>> {
    debug!("Fetching entries for owner {} since {}", owner_id, since);

    let sql = format!(
        "SELECT {} FROM entries WHERE user_id = ?1 AND created_at >= ?2 ORDER BY created_at ASC, id ASC",
        ENTRY_COLUMNS
    );
    let mut stmt = conn.prepare(&sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(params![owner_id, format_timestamp(since)], row_to_entry)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Fetched {} entries", entries.len());
    Ok(entries)
}

/// Deletes one entry of `owner_id`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the owner has no such entry.
pub fn delete_entry(conn: &Connection, owner_id: i64, entry_id: i64) -> AppResult<()> {
    debug!("Deleting entry {} for owner {}", entry_id, owner_id);

    let rows_affected = conn
        .execute(
            "DELETE FROM entries WHERE id = ?1 AND user_id = ?2",
            params![entry_id, owner_id],
        )
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(
            DatabaseError::NotFound(format!("Entry with id {} not found", entry_id)).into(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;
    use crate::db::users::get_or_create_user;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()
    }

    fn new_entry(title: &str, mood: &str, score: u8) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            content: format!("{} content", title),
            mood_name: mood.to_string(),
            mood_score: score,
            mood_image_url: None,
            collection_id: None,
        }
    }

    #[test]
    fn test_insert_and_get_entry() {
        let conn = setup_test_db();
        let owner = get_or_create_user(&conn, "alice", base_time()).unwrap();

        let mut entry = new_entry("Morning", "happy", 8);
        entry.mood_image_url = Some("https://example.com/a.jpg".to_string());
        let id = insert_entry(&conn, owner, &entry, base_time()).unwrap();

        let stored = get_entry(&conn, owner, id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.owner_id, owner);
        assert_eq!(stored.title, "Morning");
        assert_eq!(stored.mood_name, "happy");
        assert_eq!(stored.mood_score, 8);
        assert_eq!(stored.mood_image_url.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(stored.created_at, base_time());
    }

    #[test]
    fn test_get_entry_of_other_owner() {
        let conn = setup_test_db();
        let alice = get_or_create_user(&conn, "alice", base_time()).unwrap();
        let bob = get_or_create_user(&conn, "bob", base_time()).unwrap();

        let id = insert_entry(&conn, alice, &new_entry("Private", "sad", 3), base_time()).unwrap();

        assert!(get_entry(&conn, bob, id).unwrap().is_none());
    }

    #[test]
    fn test_list_entries_newest_first() {
        let conn = setup_test_db();
        let owner = get_or_create_user(&conn, "alice", base_time()).unwrap();

        insert_entry(&conn, owner, &new_entry("first", "calm", 7), base_time()).unwrap();
        insert_entry(
            &conn,
            owner,
            &new_entry("second", "calm", 7),
            base_time() + Duration::hours(1),
        )
        .unwrap();

        let entries = list_entries(&conn, owner, CollectionFilter::All).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_list_entries_by_collection() {
        let conn = setup_test_db();
        let owner = get_or_create_user(&conn, "alice", base_time()).unwrap();
        conn.execute(
            "INSERT INTO collections (user_id, name, created_at) VALUES (?1, 'work', '2024-01-01T00:00:00.000000Z')",
            params![owner],
        )
        .unwrap();
        let collection_id = conn.last_insert_rowid();

        let mut filed = new_entry("filed", "proud", 8);
        filed.collection_id = Some(collection_id);
        insert_entry(&conn, owner, &filed, base_time()).unwrap();
        insert_entry(&conn, owner, &new_entry("loose", "tired", 4), base_time()).unwrap();

        let in_collection =
            list_entries(&conn, owner, CollectionFilter::Collection(collection_id)).unwrap();
        assert_eq!(in_collection.len(), 1);
        assert_eq!(in_collection[0].title, "filed");

        let unorganized = list_entries(&conn, owner, CollectionFilter::Unorganized).unwrap();
        assert_eq!(unorganized.len(), 1);
        assert_eq!(unorganized[0].title, "loose");

        assert_eq!(list_entries(&conn, owner, CollectionFilter::All).unwrap().len(), 2);
    }

    #[test]
    fn test_fetch_entries_since_is_ascending_and_bounded() {
        let conn = setup_test_db();
        let owner = get_or_create_user(&conn, "alice", base_time()).unwrap();

        let old = base_time() - Duration::days(30);
        insert_entry(&conn, owner, &new_entry("old", "sad", 3), old).unwrap();
        insert_entry(
            &conn,
            owner,
            &new_entry("later", "happy", 8),
            base_time() + Duration::hours(2),
        )
        .unwrap();
        insert_entry(&conn, owner, &new_entry("boundary", "calm", 7), base_time()).unwrap();

        let entries = fetch_entries_since(&conn, owner, base_time()).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["boundary", "later"]);
    }

    #[test]
    fn test_fetch_entries_since_other_owner_excluded() {
        let conn = setup_test_db();
        let alice = get_or_create_user(&conn, "alice", base_time()).unwrap();
        let bob = get_or_create_user(&conn, "bob", base_time()).unwrap();

        insert_entry(&conn, bob, &new_entry("bob's", "angry", 2), base_time()).unwrap();

        let since = base_time() - Duration::days(1);
        assert!(fetch_entries_since(&conn, alice, since).unwrap().is_empty());
    }

    #[test]
    fn test_delete_entry() {
        let conn = setup_test_db();
        let owner = get_or_create_user(&conn, "alice", base_time()).unwrap();
        let id = insert_entry(&conn, owner, &new_entry("gone", "sad", 3), base_time()).unwrap();

        delete_entry(&conn, owner, id).unwrap();
        assert!(get_entry(&conn, owner, id).unwrap().is_none());
    }

    #[test]
    fn test_delete_entry_not_found() {
        let conn = setup_test_db();
        let owner = get_or_create_user(&conn, "alice", base_time()).unwrap();

        let result = delete_entry(&conn, owner, 999);
        assert!(matches!(
            result,
            Err(crate::errors::AppError::Database(DatabaseError::NotFound(_)))
        ));
    }
}
