//! Error handling utilities for the reverie application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use thiserror::Error;

/// Represents input that was rejected before any work was done.
///
/// These are local validation failures. Callers must reject the originating request
/// rather than substituting defaults, since a silently defaulted window or mood would
/// skew every average computed downstream.
///
/// # Examples
///
/// ```
/// use reverie::errors::ValidationError;
///
/// let error = ValidationError::InvalidWindow {
///     value: "0".to_string(),
/// };
/// assert!(format!("{}", error).contains("Invalid analytics window"));
///
/// let error = ValidationError::MoodNotFound {
///     name: "elated".to_string(),
/// };
/// assert!(format!("{}", error).contains("elated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The analytics window was zero, negative or not a number.
    #[error("Invalid analytics window '{value}'. Use a positive number of days such as 7, 15d or 30d.")]
    InvalidWindow {
        /// The rejected input, as supplied
        value: String,
    },

    /// The mood identifier is not part of the mood table.
    #[error("Unknown mood '{name}'. Run `reverie moods` to see the available moods.")]
    MoodNotFound {
        /// The mood name that was looked up
        name: String,
    },

    /// A required field was left empty.
    #[error("The {field} cannot be empty.")]
    EmptyField {
        /// Name of the empty field
        field: &'static str,
    },
}

/// Represents specific error cases that can occur when interacting with external editors.
///
/// # Examples
///
/// ```
/// use reverie::errors::EditorError;
///
/// let error = EditorError::NonZeroExit {
///     command: "vim".to_string(),
///     status_code: 1,
/// };
///
/// assert!(format!("{}", error).contains("non-zero status code"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. The entry was not saved.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use reverie::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Entry with id 123 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other reverie instances.")]
    Pool(#[from] r2d2::Error),

    /// Requested row not found in database.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule would be violated.
    #[error("Already exists: {0}")]
    Conflict(String),
}

/// Represents failures talking to the external image search and prompt services.
///
/// # Examples
///
/// ```
/// use reverie::errors::ServiceError;
///
/// let error = ServiceError::InvalidResponse("HTTP 500".to_string());
/// assert!(format!("{}", error).contains("HTTP 500"));
/// ```
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service could not be reached.
    #[error("Service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The service answered with an error status or an unexpected body.
    #[error("Invalid response from service: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the reverie application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use reverie::errors::AppError;
///
/// let error = AppError::Config("Database path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Database path is empty");
/// ```
///
/// Converting from a validation error:
/// ```
/// use reverie::errors::{AppError, ValidationError};
///
/// let app_error: AppError = ValidationError::MoodNotFound { name: "meh".to_string() }.into();
/// assert!(matches!(app_error, AppError::Validation(ValidationError::MoodNotFound { .. })));
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected user input (window sizes, mood names, empty fields).
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors from the external image search or prompt services.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Failures rendering JSON output.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use reverie::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Config("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
