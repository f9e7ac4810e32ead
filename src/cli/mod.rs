//! Command-line interface definitions.

use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::ops::EntrySelection;
use clap::{Parser, Subcommand, ValueEnum};

/// Mood journaling with analytics
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format (also settable via REVERIE_LOG_FORMAT)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Format of the diagnostic log written to stderr.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parses a format name as accepted by `REVERIE_LOG_FORMAT`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            LOG_FORMAT_TEXT => Some(LogFormat::Text),
            LOG_FORMAT_JSON => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Write a new entry
    Write {
        /// Title of the entry
        #[arg(long, required_unless_present = "draft")]
        title: Option<String>,

        /// Mood of the entry (see `moods`)
        #[arg(long, required_unless_present = "draft")]
        mood: Option<String>,

        /// File the entry in this collection
        #[arg(long, conflicts_with = "draft")]
        collection: Option<String>,

        /// Entry text; opens the editor when omitted
        #[arg(long)]
        content: Option<String>,

        /// Save as draft instead of publishing
        #[arg(long)]
        draft: bool,
    },

    /// List entries, newest first
    Entries {
        /// Only entries of this collection
        #[arg(long, conflicts_with = "unorganized")]
        collection: Option<String>,

        /// Only entries outside any collection
        #[arg(long)]
        unorganized: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one entry
    Show {
        id: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Delete one entry
    Delete { id: i64 },

    /// Manage collections
    Collections {
        #[command(subcommand)]
        action: CollectionCommand,
    },

    /// Mood statistics over recent entries
    Analytics {
        /// Window length in days, e.g. "7d" or "30d" (defaults to 7d)
        #[arg(long)]
        period: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the available moods
    Moods,

    /// Show today's writing prompt
    Prompt,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CollectionCommand {
    /// List collections with entry counts
    List,

    /// Create a collection
    Create {
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a collection and all of its entries
    Delete { name: String },
}

/// Maps the `entries` filter flags to a selection.
pub fn entry_selection(collection: Option<String>, unorganized: bool) -> EntrySelection {
    match (collection, unorganized) {
        (Some(name), _) => EntrySelection::Collection(name),
        (None, true) => EntrySelection::Unorganized,
        (None, false) => EntrySelection::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["reverie", "moods"]);
        assert!(!args.verbose);
        assert_eq!(args.log_format, None);
        assert_eq!(args.command, Commands::Moods);

        let args = CliArgs::parse_from(["reverie", "prompt", "-v", "--log-format", "json"]);
        assert!(args.verbose);
        assert_eq!(args.log_format, Some(LogFormat::Json));
        assert_eq!(args.command, Commands::Prompt);
    }

    #[test]
    fn test_write_args() {
        let args = CliArgs::parse_from([
            "reverie",
            "write",
            "--title",
            "Morning",
            "--mood",
            "calm",
            "--content",
            "Coffee on the balcony.",
            "--collection",
            "Home",
        ]);

        assert_eq!(
            args.command,
            Commands::Write {
                title: Some("Morning".to_string()),
                mood: Some("calm".to_string()),
                collection: Some("Home".to_string()),
                content: Some("Coffee on the balcony.".to_string()),
                draft: false,
            }
        );
    }

    #[test]
    fn test_write_requires_title_and_mood_unless_draft() {
        assert!(CliArgs::try_parse_from(["reverie", "write", "--mood", "calm"]).is_err());
        assert!(CliArgs::try_parse_from(["reverie", "write", "--title", "T"]).is_err());

        let args = CliArgs::try_parse_from(["reverie", "write", "--draft"]).unwrap();
        assert!(matches!(args.command, Commands::Write { draft: true, .. }));
    }

    #[test]
    fn test_draft_takes_no_collection() {
        assert!(CliArgs::try_parse_from([
            "reverie",
            "write",
            "--draft",
            "--collection",
            "Travel"
        ])
        .is_err());
    }

    #[test]
    fn test_entries_filters_conflict() {
        assert!(CliArgs::try_parse_from([
            "reverie",
            "entries",
            "--collection",
            "Work",
            "--unorganized"
        ])
        .is_err());
    }

    #[test]
    fn test_entry_selection() {
        assert_eq!(entry_selection(None, false), EntrySelection::All);
        assert_eq!(entry_selection(None, true), EntrySelection::Unorganized);
        assert_eq!(
            entry_selection(Some("Work".to_string()), false),
            EntrySelection::Collection("Work".to_string())
        );
    }

    #[test]
    fn test_analytics_args() {
        let args = CliArgs::parse_from(["reverie", "analytics"]);
        assert_eq!(
            args.command,
            Commands::Analytics {
                period: None,
                json: false
            }
        );

        let args = CliArgs::parse_from(["reverie", "analytics", "--period", "30d", "--json"]);
        assert_eq!(
            args.command,
            Commands::Analytics {
                period: Some("30d".to_string()),
                json: true
            }
        );
    }

    #[test]
    fn test_collection_commands() {
        let args = CliArgs::parse_from(["reverie", "collections", "create", "Dreams", "--description", "night"]);
        assert_eq!(
            args.command,
            Commands::Collections {
                action: CollectionCommand::Create {
                    name: "Dreams".to_string(),
                    description: Some("night".to_string()),
                }
            }
        );

        let args = CliArgs::parse_from(["reverie", "collections", "delete", "Dreams"]);
        assert_eq!(
            args.command,
            Commands::Collections {
                action: CollectionCommand::Delete {
                    name: "Dreams".to_string()
                }
            }
        );
    }

    #[test]
    fn test_log_format_from_name() {
        assert_eq!(LogFormat::from_name("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::from_name("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::from_name("xml"), None);
    }

    #[test]
    fn test_invalid_id_rejected() {
        assert!(CliArgs::try_parse_from(["reverie", "show", "seven"]).is_err());
    }
}
