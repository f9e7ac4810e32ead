//! Database operations for journal entries, collections and drafts.
//!
//! This module provides SQLite storage using connection pooling via r2d2.
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that range
//! queries can compare them as text.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `users`: Owner identities
//! - `entries`: Entry CRUD operations and the analytics read query
//! - `collections`: Named groups of entries
//! - `drafts`: The single in-progress draft per owner
//! - `prompt_cache`: The cached daily writing prompt
//!
//! # Example
//!
//! ```no_run
//! use reverie::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/reverie.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod collections;
pub mod drafts;
pub mod entries;
pub mod prompt_cache;
pub mod schema;
pub mod users;

use crate::constants::DB_POOL_MAX_SIZE;
use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

pub use entries::JournalEntry;

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Read access to stored entries, as needed by the mood analytics.
///
/// Implementations must return entries ordered by `created_at` ascending.
pub trait EntryStore {
    /// Fetches all entries of `owner_id` created at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the owner does not exist, or a
    /// storage error if the query cannot be run.
    fn fetch_entries(&self, owner_id: i64, since: DateTime<Utc>) -> AppResult<Vec<JournalEntry>>;
}

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates a SQLite database.
    ///
    /// Parent directories are created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DB_POOL_MAX_SIZE)
            .connection_customizer(Box::new(ForeignKeys))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

impl EntryStore for Database {
    fn fetch_entries(&self, owner_id: i64, since: DateTime<Utc>) -> AppResult<Vec<JournalEntry>> {
        let conn = self.get_conn()?;
        if !users::user_exists(&conn, owner_id)? {
            return Err(
                DatabaseError::NotFound(format!("Owner with id {} not found", owner_id)).into(),
            );
        }
        entries::fetch_entries_since(&conn, owner_id, since)
    }
}

/// Connection customizer that turns on foreign key enforcement.
#[derive(Debug)]
struct ForeignKeys;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ForeignKeys {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(())
    }
}

/// Formats a timestamp the way every table stores it.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored timestamp for column `idx`.
pub(crate) fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    #[test]
    fn test_database_open_and_connect() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dir").join("test.db");

        let db = Database::open(&db_path).unwrap();
        db.initialize_schema().unwrap();

        assert!(db_path.exists());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        let conn = db.get_conn().unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();

        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();
    }

    #[test]
    fn test_fetch_entries_unknown_owner() {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();

        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        match db.fetch_entries(42, since) {
            Err(crate::errors::AppError::Database(DatabaseError::NotFound(msg))) => {
                assert!(msg.contains("42"));
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_timestamp_format_sorts_as_text() {
        let early = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let late = early + Duration::milliseconds(1500);

        let a = format_timestamp(early);
        let b = format_timestamp(late);
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(parse_timestamp(0, &a).unwrap(), early);
    }
}
