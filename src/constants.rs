//! Constants used throughout the application.
//!
//! This module contains all constants used in the reverie application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "reverie";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A mood journal with daily reflections and mood analytics";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for the database path.
pub const ENV_VAR_REVERIE_DB: &str = "REVERIE_DB";
/// Environment variable for the owner identity.
pub const ENV_VAR_REVERIE_USER: &str = "REVERIE_USER";
/// Standard environment variable for the login name, used as owner fallback.
pub const ENV_VAR_USER: &str = "USER";
/// Environment variable for specifying the preferred reverie editor.
pub const ENV_VAR_REVERIE_EDITOR: &str = "REVERIE_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Environment variable holding the Pixabay API key.
pub const ENV_VAR_PIXABAY_API_KEY: &str = "PIXABAY_API_KEY";
/// Environment variable overriding the image search endpoint.
pub const ENV_VAR_PIXABAY_URL: &str = "REVERIE_PIXABAY_URL";
/// Environment variable overriding the daily prompt endpoint.
pub const ENV_VAR_ADVICE_URL: &str = "REVERIE_ADVICE_URL";
/// Environment variable selecting the log format.
pub const ENV_VAR_LOG_FORMAT: &str = "REVERIE_LOG_FORMAT";
/// Default database location relative to the home directory.
pub const DEFAULT_DB_SUBPATH: &str = ".reverie/reverie.db";
/// Owner identity used when neither REVERIE_USER nor USER is set.
pub const DEFAULT_OWNER: &str = "default";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Mood Trends
/// Lowest average score still described as a positive trend.
pub const POSITIVE_TREND_THRESHOLD: f64 = 8.0;
/// Lowest average score still described as a neutral trend.
pub const NEUTRAL_TREND_THRESHOLD: f64 = 5.0;

// Analytics
/// Window used when no period is requested.
pub const DEFAULT_ANALYTICS_WINDOW_DAYS: i64 = 7;
/// Period suffix accepted by the analytics command ("7d", "30d").
pub const ANALYTICS_PERIOD_SUFFIX: char = 'd';

// External Services
/// Default image search endpoint.
pub const DEFAULT_PIXABAY_URL: &str = "https://pixabay.com/api/";
/// Default daily prompt endpoint.
pub const DEFAULT_ADVICE_URL: &str = "https://api.adviceslip.com/advice";
/// Prompt shown when the prompt service is unavailable.
pub const FALLBACK_PROMPT: &str = "What's on your mind today?";
/// How long a fetched daily prompt is reused, in hours.
pub const PROMPT_CACHE_HOURS: i64 = 24;
/// Timeout for outbound HTTP requests, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

// Database
/// Maximum number of pooled SQLite connections.
pub const DB_POOL_MAX_SIZE: u32 = 4;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "reverie";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
