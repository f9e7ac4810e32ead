//! High-level operations for journaling and mood analytics.
//!
//! This module provides user-facing operations that orchestrate the storage
//! layer, the external services and the pure aggregation in `analytics`.

pub mod analytics;
pub mod collections;
pub mod entries;
pub mod prompt;
pub mod write;

pub use analytics::mood_analytics;
pub use collections::{create_collection, delete_collection, list_collections};
pub use entries::{delete_entry, list_entries, show_entry, EntrySelection};
pub use prompt::daily_prompt;
pub use write::{
    check_entry_target, compose_content, create_entry, create_entry_or_keep_draft, save_draft,
    NewEntryRequest,
};

use crate::db::{users, Database};
use crate::errors::AppResult;
use chrono::{DateTime, Utc};

/// Maps an external identity to its owner id, creating the owner on first use.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn resolve_owner(db: &Database, external_id: &str, now: DateTime<Utc>) -> AppResult<i64> {
    let conn = db.get_conn()?;
    users::get_or_create_user(&conn, external_id, now)
}
