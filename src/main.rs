/*!
# Reverie - A Mood Journal

Command-line front end: parses arguments, sets up logging, loads the
configuration and dispatches to the operations in `reverie::ops`.

## Usage

```
reverie [OPTIONS] <COMMAND>

Commands:
  write        Write a new entry
  entries      List entries, newest first
  show         Show one entry
  delete       Delete one entry
  collections  Manage collections
  analytics    Mood statistics over recent entries
  moods        List the available moods
  prompt       Show today's writing prompt

Options:
  -v, --verbose                 Enable verbose output
      --log-format <FORMAT>     text or json
  -h, --help                    Print help information
  -V, --version                 Print version information
```

## Configuration

- `REVERIE_DB`: Database location (defaults to "~/.reverie/reverie.db")
- `REVERIE_USER` or `USER`: Whose journal to use
- `REVERIE_EDITOR` or `EDITOR`: Editor for composing entries (defaults to "vim")
- `PIXABAY_API_KEY`: Enables cover images
- `REVERIE_LOG_FORMAT`: "text" or "json"
- `RUST_LOG`: Log filter (defaults to "info")
*/

use chrono::{DateTime, Utc};
use clap::Parser;
use reverie::analytics::parse_window;
use reverie::cli::{entry_selection, CliArgs, CollectionCommand, Commands, LogFormat};
use reverie::config::Config;
use reverie::constants::{
    DEFAULT_ANALYTICS_WINDOW_DAYS, DEFAULT_LOG_LEVEL, ENV_VAR_LOG_FORMAT, TRACING_ROOT_SPAN_NAME,
    TRACING_SERVICE_NAME,
};
use reverie::db::drafts::Draft;
use reverie::db::Database;
use reverie::editor::SystemEditor;
use reverie::errors::AppResult;
use reverie::moods::{get_mood_by_name, MOODS};
use reverie::ops::{self, NewEntryRequest};
use reverie::services::{ImageSearchClient, PromptClient};
use reverie::{AnalyticsResult, JournalEntry, MoodTrend};
use serde::Serialize;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();

    let log_format = args
        .log_format
        .or_else(|| {
            std::env::var(ENV_VAR_LOG_FORMAT)
                .ok()
                .and_then(|name| LogFormat::from_name(&name))
        })
        .unwrap_or_default();
    init_tracing(args.verbose, log_format);

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(args.command) {
        error!(error = %e, "Application error");
        std::process::exit(1);
    }
}

/// Installs the global subscriber writing to stderr.
fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        ),
        LogFormat::Text => Box::new(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        ),
    };

    tracing_subscriber::registry().with(layer).init();
}

/// Configuration, database and owner for commands that touch the journal.
struct Session {
    config: Config,
    db: Database,
    owner: i64,
}

impl Session {
    fn open(now: DateTime<Utc>) -> AppResult<Self> {
        info!("Loading configuration");
        let config = Config::load()?;
        config.validate()?;
        debug!("Configuration: {:?}", config);

        let db = Database::open(&config.db_path)?;
        db.initialize_schema()?;
        let owner = ops::resolve_owner(&db, &config.owner, now)?;

        Ok(Session { config, db, owner })
    }
}

fn run(command: Commands) -> AppResult<()> {
    // Obtain current time once at the beginning
    let now = Utc::now();

    match command {
        Commands::Write {
            title,
            mood,
            collection,
            content,
            draft,
        } => {
            let Session { config, db, owner } = Session::open(now)?;
            let editor = SystemEditor {
                editor_cmd: config.editor.clone(),
            };

            if draft {
                let content = match content {
                    Some(content) => content,
                    None => ops::compose_content(&db, &editor, owner)?,
                };
                let draft = Draft {
                    title: title.unwrap_or_default(),
                    content,
                    mood: mood.unwrap_or_default(),
                };
                ops::save_draft(&db, owner, &draft, now)?;
                println!("Draft saved.");
                return Ok(());
            }

            let mut request = NewEntryRequest {
                title: title.unwrap_or_default(),
                content: String::new(),
                mood: mood.unwrap_or_default(),
                collection,
            };
            ops::check_entry_target(&db, owner, &request)?;

            let images = config
                .pixabay_api_key
                .as_ref()
                .map(|key| ImageSearchClient::new(config.pixabay_url.as_str(), key.as_str()));
            let entry = match content {
                Some(content) => {
                    request.content = content;
                    ops::create_entry(&db, images.as_ref(), owner, &request, now)?
                }
                None => {
                    request.content = ops::compose_content(&db, &editor, owner)?;
                    ops::create_entry_or_keep_draft(&db, images.as_ref(), owner, &request, now)?
                }
            };
            println!("Created entry {}: {}", entry.id, entry.title);
        }
        Commands::Entries {
            collection,
            unorganized,
            json,
        } => {
            let Session { db, owner, .. } = Session::open(now)?;
            let entries =
                ops::list_entries(&db, owner, &entry_selection(collection, unorganized))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No entries yet.");
            } else {
                for entry in &entries {
                    print_entry_line(entry);
                }
            }
        }
        Commands::Show { id, json } => {
            let Session { db, owner, .. } = Session::open(now)?;
            let entry = ops::show_entry(&db, owner, id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                print_entry(&entry);
            }
        }
        Commands::Delete { id } => {
            let Session { db, owner, .. } = Session::open(now)?;
            ops::delete_entry(&db, owner, id)?;
            println!("Deleted entry {}.", id);
        }
        Commands::Collections { action } => {
            let Session { db, owner, .. } = Session::open(now)?;
            match action {
                CollectionCommand::List => {
                    let collections = ops::list_collections(&db, owner)?;
                    if collections.is_empty() {
                        println!("No collections yet.");
                    }
                    for c in &collections {
                        match &c.description {
                            Some(description) => {
                                println!("{} ({} entries) - {}", c.name, c.entry_count, description)
                            }
                            None => println!("{} ({} entries)", c.name, c.entry_count),
                        }
                    }
                }
                CollectionCommand::Create { name, description } => {
                    let collection =
                        ops::create_collection(&db, owner, &name, description.as_deref(), now)?;
                    println!("Created collection '{}'.", collection.name);
                }
                CollectionCommand::Delete { name } => {
                    let removed = ops::delete_collection(&db, owner, &name)?;
                    println!("Deleted collection '{}' and {} entries.", name, removed);
                }
            }
        }
        Commands::Analytics { period, json } => {
            let window_days = match period {
                Some(period) => parse_window(&period)?,
                None => DEFAULT_ANALYTICS_WINDOW_DAYS,
            };
            let Session { db, owner, .. } = Session::open(now)?;
            let result = ops::mood_analytics(&db, owner, window_days, now)?;
            if json {
                let report = AnalyticsReport {
                    window_days,
                    result: &result,
                    trend: result.trend(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_analytics(&result, window_days);
            }
        }
        Commands::Prompt => {
            let Session { config, db, .. } = Session::open(now)?;
            let client = PromptClient::new(config.advice_url.as_str());
            println!("{}", ops::daily_prompt(&db, &client, now)?);
        }
        Commands::Moods => print_moods(),
    }

    Ok(())
}

#[derive(Serialize)]
struct AnalyticsReport<'a> {
    window_days: i64,
    #[serde(flatten)]
    result: &'a AnalyticsResult,
    trend: Option<MoodTrend>,
}

fn print_moods() {
    for mood in MOODS {
        println!(
            "{} {:<10} {:<10} score {}",
            mood.emoji, mood.name, mood.label, mood.score
        );
    }
}

fn mood_emoji(name: &str) -> &'static str {
    get_mood_by_name(name).map(|m| m.emoji).unwrap_or(" ")
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

fn print_entry_line(entry: &JournalEntry) {
    println!(
        "{:>5}  {}  {} {:<10}  {}",
        entry.id,
        format_date(entry.created_at),
        mood_emoji(&entry.mood_name),
        entry.mood_name,
        entry.title
    );
}

fn print_entry(entry: &JournalEntry) {
    println!("# {}", entry.title);
    println!(
        "{} | {} {} ({}/10)",
        format_date(entry.created_at),
        mood_emoji(&entry.mood_name),
        entry.mood_name,
        entry.mood_score
    );
    if let Some(url) = &entry.mood_image_url {
        println!("Image: {}", url);
    }
    println!();
    println!("{}", entry.content);
}

fn print_analytics(result: &AnalyticsResult, window_days: i64) {
    println!("Mood analytics for the last {} days", window_days);

    let Some(trend) = result.trend() else {
        println!("No entries in this period.");
        return;
    };

    println!("Entries:         {}", result.total_entries);
    println!("Average score:   {:.1} ({})", result.average_score, trend);
    println!("Entries per day: {:.2}", result.daily_average);
    if let Some(mood) = &result.most_frequent_mood {
        println!("Most frequent:   {} {}", mood_emoji(mood), mood);
    }

    println!();
    for day in &result.timeline {
        println!(
            "{}  {:>3} {:<7}  avg {:.1}",
            day.date,
            day.entry_count,
            if day.entry_count == 1 { "entry" } else { "entries" },
            day.average_score
        );
    }
}
