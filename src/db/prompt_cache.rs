//! Cache for the daily writing prompt.
//!
//! The prompt service is only asked once per cache period; the answer lives in a
//! single-row table.

use crate::db::{format_timestamp, parse_timestamp};
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Returns the cached prompt if it was fetched less than `max_age` before `now`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn get_cached_prompt(
    conn: &Connection,
    max_age: Duration,
    now: DateTime<Utc>,
) -> AppResult<Option<String>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT prompt, fetched_at FROM prompt_cache WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;

    let Some((prompt, fetched_at)) = row else {
        return Ok(None);
    };

    let fetched_at = parse_timestamp(1, &fetched_at).map_err(DatabaseError::Sqlite)?;
    if now - fetched_at < max_age {
        debug!("Using prompt cached at {}", fetched_at);
        Ok(Some(prompt))
    } else {
        debug!("Cached prompt from {} expired", fetched_at);
        Ok(None)
    }
}

/// Stores `prompt` as the current daily prompt.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn store_prompt(conn: &Connection, prompt: &str, now: DateTime<Utc>) -> AppResult<()> {
    conn.execute(
        r#"
        INSERT INTO prompt_cache (id, prompt, fetched_at) VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET prompt = excluded.prompt, fetched_at = excluded.fetched_at
        "#,
        params![prompt, format_timestamp(now)],
    )
    .map_err(DatabaseError::Sqlite)?;
    Ok(())
}
