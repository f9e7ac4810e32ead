//! Draft storage.
//!
//! Each owner has at most one draft: the entry they started but have not
//! published yet. Publishing an entry clears it.

use crate::db::format_timestamp;
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// An unfinished entry. Fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub mood: String,
}

/// Stores `draft` as the owner's draft, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn save_draft(conn: &Connection, owner_id: i64, draft: &Draft, now: DateTime<Utc>) -> AppResult<()> {
    debug!("Saving draft for owner {}", owner_id);

    conn.execute(
        r#"
        INSERT INTO drafts (user_id, title, content, mood, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(user_id) DO UPDATE SET
            title = excluded.title,
            content = excluded.content,
            mood = excluded.mood,
            updated_at = excluded.updated_at
        "#,
        params![
            owner_id,
            draft.title,
            draft.content,
            draft.mood,
            format_timestamp(now)
        ],
    )
    .map_err(DatabaseError::Sqlite)?;
    Ok(())
}

/// Returns the owner's draft, if any.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn get_draft(conn: &Connection, owner_id: i64) -> AppResult<Option<Draft>> {
    let draft = conn
        .query_row(
            "SELECT title, content, mood FROM drafts WHERE user_id = ?1",
            params![owner_id],
            |row| {
                Ok(Draft {
                    title: row.get(0)?,
                    content: row.get(1)?,
                    mood: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(draft)
}

/// Removes the owner's drafts and returns how many were removed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_drafts(conn: &Connection, owner_id: i64) -> AppResult<usize> {
    let removed = conn
        .execute("DELETE FROM drafts WHERE user_id = ?1", params![owner_id])
        .map_err(DatabaseError::Sqlite)?;
    debug!("Removed {} drafts for owner {}", removed, owner_id);
    Ok(removed)
}
