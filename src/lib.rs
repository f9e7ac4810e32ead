/*!
# Reverie

Reverie is a mood journal. Each entry records a title, free text and one mood from
a fixed mood table; the mood analytics summarize how the writer has been feeling
over a trailing window of days.

## Core Features

- Write entries with a mood, optionally filed in a collection
- Keep one unfinished draft per owner
- Look up a cover image for the entry's mood
- A cached daily writing prompt
- Mood analytics: daily timeline, overall average, entries per day and the most
  frequent mood

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `analytics`: Pure aggregation of entries into mood statistics
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `db`: SQLite storage for owners, entries, collections, drafts and the prompt cache
- `editor`: Composing entry text in an external editor
- `errors`: Error handling infrastructure
- `moods`: The mood table
- `ops`: High-level operations combining storage and services
- `services`: Image search and daily prompt HTTP clients

## Usage Example

```rust,no_run
use reverie::db::Database;
use reverie::ops::{mood_analytics, resolve_owner};
use reverie::Config;

fn main() -> reverie::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;

    let now = chrono::Utc::now();
    let owner = resolve_owner(&db, &config.owner, now)?;
    let stats = mood_analytics(&db, owner, 7, now)?;
    println!("{} entries, average {}", stats.total_entries, stats.average_score);
    Ok(())
}
```
*/

/// Mood statistics over a window of entries
pub mod analytics;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite storage
pub mod db;
/// External editor integration
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// The mood table
pub mod moods;
/// User-facing operations
pub mod ops;
/// HTTP clients for external services
pub mod services;

// Re-export important types for convenience
pub use analytics::{compute_analytics, AnalyticsResult, DailyBucket};
pub use cli::CliArgs;
pub use config::Config;
pub use db::{EntryStore, JournalEntry};
pub use errors::{AppError, AppResult};
pub use moods::{Mood, MoodTrend, MOODS};
