//! Writing new entries and drafts.

use crate::db::collections::get_collection_by_name;
use crate::db::drafts::{self, Draft};
use crate::db::entries::{get_entry, insert_entry, NewEntry};
use crate::db::{Database, JournalEntry};
use crate::editor::{compose, Editor};
use crate::errors::{AppResult, DatabaseError, ValidationError};
use crate::moods::{get_mood_by_name, Mood};
use crate::services::ImageSearchClient;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, info, warn};

/// What the user asked to publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntryRequest {
    pub title: String,
    pub content: String,
    /// Mood name, matched case-insensitively against the mood table.
    pub mood: String,
    /// Name of the collection to file the entry in.
    pub collection: Option<String>,
}

/// Checks everything about `request` except its content.
///
/// Called before the editor opens, so a bad title, mood or collection is
/// reported before the user writes anything.
///
/// # Errors
///
/// Returns an error if:
/// - The title is blank (`ValidationError::EmptyField`)
/// - The mood is unknown (`ValidationError::MoodNotFound`)
/// - The collection does not exist (`DatabaseError::NotFound`)
pub fn check_entry_target(
    db: &Database,
    owner_id: i64,
    request: &NewEntryRequest,
) -> AppResult<()> {
    let conn = db.get_conn()?;
    resolve_target(&conn, owner_id, request)?;
    Ok(())
}

fn resolve_target(
    conn: &Connection,
    owner_id: i64,
    request: &NewEntryRequest,
) -> AppResult<(&'static Mood, Option<i64>)> {
    if request.title.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "title" }.into());
    }
    let mood = get_mood_by_name(&request.mood)?;

    let collection_id = match &request.collection {
        Some(name) => {
            let collection = get_collection_by_name(conn, owner_id, name)?.ok_or_else(|| {
                DatabaseError::NotFound(format!("Collection '{}' not found", name))
            })?;
            Some(collection.id)
        }
        None => None,
    };

    Ok((mood, collection_id))
}

/// Validates and stores a new entry for `owner_id`.
///
/// # Flow
///
/// 1. Title and content must be non-empty
/// 2. Mood is resolved through the mood table
/// 3. Collection (if any) is resolved by name
/// 4. A cover image is looked up for the mood; failures are logged and skipped
/// 5. The entry is stored and the owner's draft is cleared
///
/// # Errors
///
/// Returns an error if:
/// - Title or content is blank (`ValidationError::EmptyField`)
/// - The mood is unknown (`ValidationError::MoodNotFound`)
/// - The collection does not exist (`DatabaseError::NotFound`)
/// - Database operations fail
pub fn create_entry(
    db: &Database,
    images: Option<&ImageSearchClient>,
    owner_id: i64,
    request: &NewEntryRequest,
    now: DateTime<Utc>,
) -> AppResult<JournalEntry> {
    if request.content.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "content" }.into());
    }

    let conn = db.get_conn()?;
    let (mood, collection_id) = resolve_target(&conn, owner_id, request)?;

    let mood_image_url = images.and_then(|client| lookup_image(client, mood));

    let new_entry = NewEntry {
        title: request.title.trim().to_string(),
        content: request.content.clone(),
        mood_name: mood.name.to_string(),
        mood_score: mood.score,
        mood_image_url,
        collection_id,
    };

    let tx = conn.unchecked_transaction().map_err(DatabaseError::Sqlite)?;
    let entry_id = insert_entry(&tx, owner_id, &new_entry, now)?;
    drafts::delete_drafts(&tx, owner_id)?;
    tx.commit().map_err(DatabaseError::Sqlite)?;

    info!("Created entry {} with mood {}", entry_id, mood.name);

    get_entry(&conn, owner_id, entry_id)?
        .ok_or_else(|| DatabaseError::NotFound(format!("Entry {} not found", entry_id)).into())
}

/// Like [`create_entry`], but on failure keeps the request's title, content
/// and mood as the owner's draft.
///
/// Used for text composed in the editor. Blank content is not kept.
///
/// # Errors
///
/// Returns the error from [`create_entry`]. A failure to save the draft is
/// logged and does not replace it.
pub fn create_entry_or_keep_draft(
    db: &Database,
    images: Option<&ImageSearchClient>,
    owner_id: i64,
    request: &NewEntryRequest,
    now: DateTime<Utc>,
) -> AppResult<JournalEntry> {
    let err = match create_entry(db, images, owner_id, request, now) {
        Ok(entry) => return Ok(entry),
        Err(e) => e,
    };
    if request.content.trim().is_empty() {
        return Err(err);
    }

    let draft = Draft {
        title: request.title.clone(),
        content: request.content.clone(),
        mood: request.mood.clone(),
    };
    match save_draft(db, owner_id, &draft, now) {
        Ok(()) => warn!("Entry was not published; its text is kept as a draft"),
        Err(draft_err) => warn!("Could not keep unpublished text as a draft: {}", draft_err),
    }
    Err(err)
}

fn lookup_image(client: &ImageSearchClient, mood: &Mood) -> Option<String> {
    match client.search(mood.search_query) {
        Ok(url) => url,
        Err(e) => {
            warn!("Image search failed for mood {}: {}", mood.name, e);
            None
        }
    }
}

/// Stores the owner's unfinished entry. Nothing is validated.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn save_draft(db: &Database, owner_id: i64, draft: &Draft, now: DateTime<Utc>) -> AppResult<()> {
    let conn = db.get_conn()?;
    drafts::save_draft(&conn, owner_id, draft, now)?;
    info!("Draft saved");
    Ok(())
}

/// Lets the user write entry content in `editor`.
///
/// The buffer starts with the content of the owner's draft, if one exists.
///
/// # Errors
///
/// Returns an error if the draft cannot be read or the editor fails.
pub fn compose_content(db: &Database, editor: &dyn Editor, owner_id: i64) -> AppResult<String> {
    let seed = {
        let conn = db.get_conn()?;
        drafts::get_draft(&conn, owner_id)?
            .map(|draft| draft.content)
            .unwrap_or_default()
    };
    debug!("Seeding editor with {} bytes of draft content", seed.len());

    compose(editor, &seed)
}
