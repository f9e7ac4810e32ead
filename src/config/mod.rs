//! Configuration management for the reverie application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `REVERIE_DB`: Path to the SQLite database (defaults to ~/.reverie/reverie.db)
//! - `REVERIE_USER`: Owner identity (falls back to `USER`, then "default")
//! - `REVERIE_EDITOR`: Editor used to compose entries
//! - `EDITOR`: Fallback editor if REVERIE_EDITOR is not set (defaults to "vim")
//! - `PIXABAY_API_KEY`: Enables cover image lookup for new entries
//! - `REVERIE_PIXABAY_URL`, `REVERIE_ADVICE_URL`: Service endpoint overrides
//! - `HOME`: Used for expanding the default database path

use crate::constants::{
    DEFAULT_ADVICE_URL, DEFAULT_DB_SUBPATH, DEFAULT_EDITOR_COMMAND, DEFAULT_OWNER,
    DEFAULT_PIXABAY_URL, EDITOR_FORBIDDEN_CHARS, ENV_VAR_ADVICE_URL, ENV_VAR_EDITOR,
    ENV_VAR_HOME, ENV_VAR_PIXABAY_API_KEY, ENV_VAR_PIXABAY_URL, ENV_VAR_REVERIE_DB,
    ENV_VAR_REVERIE_EDITOR, ENV_VAR_REVERIE_USER, ENV_VAR_USER, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the reverie application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use reverie::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/var/lib/reverie/journal.db"),
///     owner: "alice".to_string(),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Location of the SQLite database.
    pub db_path: PathBuf,

    /// Identity whose entries are read and written.
    pub owner: String,

    /// Editor command to use for composing entries.
    ///
    /// This is loaded from environment variables in the following order of precedence:
    /// 1. REVERIE_EDITOR
    /// 2. EDITOR
    /// 3. Defaults to "vim" if neither is set
    pub editor: String,

    /// Pixabay API key. Cover images are skipped when unset.
    pub pixabay_api_key: Option<String>,

    /// Image search endpoint.
    pub pixabay_url: String,

    /// Daily prompt endpoint.
    pub advice_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("owner", &REDACTED_PLACEHOLDER)
            .field("editor", &REDACTED_PLACEHOLDER)
            .field(
                "pixabay_api_key",
                &self.pixabay_api_key.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("pixabay_url", &self.pixabay_url)
            .field("advice_url", &self.advice_url)
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values and an empty database path.
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(""),
            owner: DEFAULT_OWNER.to_string(),
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            pixabay_api_key: None,
            pixabay_url: DEFAULT_PIXABAY_URL.to_string(),
            advice_url: DEFAULT_ADVICE_URL.to_string(),
        }
    }
}

impl Config {
    /// Validates an editor command string for security.
    ///
    /// This function checks that the editor command:
    /// - Is not empty
    /// - Contains no shell metacharacters
    /// - Contains no spaces
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = EDITOR_FORBIDDEN_CHARS.iter().find(|&&ch| editor_cmd.contains(ch)) {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The database path is expanded with `shellexpand`, so `~` and `$VAR`
    /// references are resolved.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The database path expansion fails
    /// - The editor command fails validation (empty, contains spaces or shell metacharacters)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reverie::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Journal database: {:?}", config.db_path),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let editor_raw = non_empty_var(ENV_VAR_REVERIE_EDITOR)
            .or_else(|| non_empty_var(ENV_VAR_EDITOR))
            .unwrap_or_else(|| DEFAULT_EDITOR_COMMAND.to_string());
        let editor = Config::validate_editor_command(&editor_raw)?;

        let db_path_str = non_empty_var(ENV_VAR_REVERIE_DB).unwrap_or_else(|| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        let expanded_path = shellexpand::full(&db_path_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let owner = non_empty_var(ENV_VAR_REVERIE_USER)
            .or_else(|| non_empty_var(ENV_VAR_USER))
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());

        Ok(Config {
            db_path: PathBuf::from(expanded_path.into_owned()),
            owner,
            editor: editor.to_string(),
            pixabay_api_key: non_empty_var(ENV_VAR_PIXABAY_API_KEY),
            pixabay_url: non_empty_var(ENV_VAR_PIXABAY_URL)
                .unwrap_or_else(|| DEFAULT_PIXABAY_URL.to_string()),
            advice_url: non_empty_var(ENV_VAR_ADVICE_URL)
                .unwrap_or_else(|| DEFAULT_ADVICE_URL.to_string()),
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Database path is empty"
    /// - "Database path must be an absolute path"
    /// - "Owner identity is empty"
    /// - any editor command validation failure
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if self.owner.trim().is_empty() {
            return Err(AppError::Config("Owner identity is empty".to_string()));
        }

        Config::validate_editor_command(&self.editor)?;

        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
