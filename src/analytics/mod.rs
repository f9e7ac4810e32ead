//! Mood analytics over a window of journal entries.
//!
//! `compute_analytics` is a pure function: it takes the entries, the window length
//! and the current time explicitly, and reads no clock or shared state. Days are
//! UTC calendar days.

use crate::constants::ANALYTICS_PERIOD_SUFFIX;
use crate::db::JournalEntry;
use crate::errors::{AppResult, ValidationError};
use crate::moods::{trend_for_score, MoodTrend};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Mood statistics for one calendar day that has at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub entry_count: usize,
    /// Mean mood score of the day, rounded to one decimal.
    pub average_score: f64,
}

/// Result of aggregating a window of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    /// One bucket per day with entries, ascending by date. Empty days are absent.
    pub timeline: Vec<DailyBucket>,
    pub total_entries: usize,
    /// Mean of every entry's score (not of the daily means), rounded to one decimal.
    pub average_score: f64,
    /// Entries per day over the whole requested window.
    pub daily_average: f64,
    pub most_frequent_mood: Option<String>,
}

impl AnalyticsResult {
    fn empty() -> Self {
        AnalyticsResult {
            timeline: Vec::new(),
            total_entries: 0,
            average_score: 0.0,
            daily_average: 0.0,
            most_frequent_mood: None,
        }
    }

    /// Trend band of the overall average, or `None` when the window had no entries.
    pub fn trend(&self) -> Option<MoodTrend> {
        if self.total_entries == 0 {
            None
        } else {
            Some(trend_for_score(self.average_score))
        }
    }
}

/// Parses a user supplied period such as `"7d"`, `"30D"` or `"15"` into days.
///
/// The accepted form is ASCII digits with an optional `d` suffix in either case.
/// Signs are not accepted.
///
/// # Errors
///
/// Returns `ValidationError::InvalidWindow` for anything that is not a positive
/// whole number of days.
///
/// # Examples
///
/// ```
/// use reverie::analytics::parse_window;
///
/// assert_eq!(parse_window("15d").unwrap(), 15);
/// assert_eq!(parse_window("30").unwrap(), 30);
/// assert!(parse_window("0d").is_err());
/// assert!(parse_window("week").is_err());
/// ```
pub fn parse_window(period: &str) -> AppResult<i64> {
    let trimmed = period.trim();
    let digits = trimmed
        .strip_suffix(|c: char| c.eq_ignore_ascii_case(&ANALYTICS_PERIOD_SUFFIX))
        .unwrap_or(trimmed);

    let invalid = || ValidationError::InvalidWindow {
        value: period.to_string(),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid().into());
    }
    let days: i64 = digits.parse().map_err(|_| invalid())?;
    validate_window(days)?;
    Ok(days)
}

/// Rejects non-positive window lengths.
///
/// # Errors
///
/// Returns `ValidationError::InvalidWindow` when `window_days <= 0`.
pub fn validate_window(window_days: i64) -> AppResult<()> {
    if window_days <= 0 {
        return Err(ValidationError::InvalidWindow {
            value: window_days.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Earliest instant that still falls inside a window ending at `now`.
///
/// Windows too large to represent start at the beginning of time.
pub fn window_start(now: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(window_days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Aggregates the entries that fall within the last `window_days` days before `now`.
///
/// Entries outside `[now - window_days, now]` are ignored, so the input does not
/// have to be pre-filtered. The input order only matters for breaking ties between
/// equally frequent moods: the mood seen first wins.
///
/// # Errors
///
/// Returns `ValidationError::InvalidWindow` when `window_days <= 0`.
///
/// # Examples
///
/// ```
/// use reverie::analytics::compute_analytics;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
/// let result = compute_analytics(&[], 7, now).unwrap();
/// assert_eq!(result.total_entries, 0);
/// assert!(result.most_frequent_mood.is_none());
/// assert!(compute_analytics(&[], 0, now).is_err());
/// ```
pub fn compute_analytics(
    entries: &[JournalEntry],
    window_days: i64,
    now: DateTime<Utc>,
) -> AppResult<AnalyticsResult> {
    validate_window(window_days)?;
    let start = window_start(now, window_days);

    let in_window: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| e.created_at >= start && e.created_at <= now)
        .collect();

    if in_window.is_empty() {
        return Ok(AnalyticsResult::empty());
    }

    // (sum of scores, count) per day
    let mut days: BTreeMap<NaiveDate, (u64, usize)> = BTreeMap::new();
    // mood -> (count, index of first occurrence)
    let mut mood_counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut score_sum: u64 = 0;

    for (idx, entry) in in_window.iter().enumerate() {
        let score = u64::from(entry.mood_score);
        score_sum += score;

        let day = days.entry(entry.created_at.date_naive()).or_insert((0, 0));
        day.0 += score;
        day.1 += 1;

        mood_counts
            .entry(entry.mood_name.as_str())
            .or_insert((0, idx))
            .0 += 1;
    }

    let timeline = days
        .into_iter()
        .map(|(date, (sum, count))| DailyBucket {
            date,
            entry_count: count,
            average_score: round_one_decimal(sum as f64 / count as f64),
        })
        .collect();

    let most_frequent_mood = mood_counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(mood, _)| mood.to_string());

    let total_entries = in_window.len();
    Ok(AnalyticsResult {
        timeline,
        total_entries,
        average_score: round_one_decimal(score_sum as f64 / total_entries as f64),
        daily_average: total_entries as f64 / window_days as f64,
        most_frequent_mood,
    })
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
