//! Mood analytics for an owner over a trailing window.

use crate::analytics::{compute_analytics, validate_window, window_start, AnalyticsResult};
use crate::db::EntryStore;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Computes mood analytics for the last `window_days` days before `now`.
///
/// The window is validated before the store is queried, so an invalid window
/// never touches storage.
///
/// # Errors
///
/// Returns an error if:
/// - `window_days <= 0` (`ValidationError::InvalidWindow`)
/// - The owner does not exist (`DatabaseError::NotFound`)
/// - The store cannot be read
pub fn mood_analytics<S: EntryStore + ?Sized>(
    store: &S,
    owner_id: i64,
    window_days: i64,
    now: DateTime<Utc>,
) -> AppResult<AnalyticsResult> {
    validate_window(window_days)?;

    let since = window_start(now, window_days);
    debug!("Analyzing owner {} since {}", owner_id, since);

    let entries = store.fetch_entries(owner_id, since)?;
    let result = compute_analytics(&entries, window_days, now)?;

    info!(
        "Analyzed {} entries over {} days",
        result.total_entries, window_days
    );
    Ok(result)
}
