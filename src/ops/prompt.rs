//! The daily writing prompt.

use crate::constants::{FALLBACK_PROMPT, PROMPT_CACHE_HOURS};
use crate::db::prompt_cache::{get_cached_prompt, store_prompt};
use crate::db::Database;
use crate::errors::AppResult;
use crate::services::PromptClient;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// Returns today's writing prompt.
///
/// A prompt fetched within the last 24 hours is served from the cache. Otherwise a
/// new prompt is fetched and cached. If the service cannot deliver one, the fixed
/// fallback prompt is returned and nothing is cached.
///
/// # Errors
///
/// Returns an error only if the cache cannot be read.
pub fn daily_prompt(db: &Database, client: &PromptClient, now: DateTime<Utc>) -> AppResult<String> {
    let conn = db.get_conn()?;

    if let Some(prompt) = get_cached_prompt(&conn, Duration::hours(PROMPT_CACHE_HOURS), now)? {
        return Ok(prompt);
    }

    match client.fetch_prompt() {
        Ok(prompt) => {
            if let Err(e) = store_prompt(&conn, &prompt, now) {
                warn!("Failed to cache daily prompt: {}", e);
            }
            debug!("Fetched a new daily prompt");
            Ok(prompt)
        }
        Err(e) => {
            warn!("Prompt service unavailable, using fallback: {}", e);
            Ok(FALLBACK_PROMPT.to_string())
        }
    }
}
