//! The mood table.
//!
//! Every entry is tagged with one of a fixed set of moods. Each mood carries the
//! score used by the analytics, a display label and emoji, the writing prompt shown
//! when it is selected, and the query used to find a matching cover image.

use crate::constants::{NEUTRAL_TREND_THRESHOLD, POSITIVE_TREND_THRESHOLD};
use crate::errors::{AppResult, ValidationError};
use serde::Serialize;
use std::fmt;

/// A single mood from the mood table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mood {
    /// Stable identifier stored with each entry (e.g. "happy").
    pub name: &'static str,
    /// Human readable label.
    pub label: &'static str,
    /// Score from 1 (worst) to 10 (best).
    pub score: u8,
    pub emoji: &'static str,
    /// Question shown to the writer when this mood is picked.
    pub prompt: &'static str,
    /// Query sent to the image search service.
    pub search_query: &'static str,
}

const fn mood(
    name: &'static str,
    label: &'static str,
    score: u8,
    emoji: &'static str,
    prompt: &'static str,
    search_query: &'static str,
) -> Mood {
    Mood {
        name,
        label,
        score,
        emoji,
        prompt,
        search_query,
    }
}

/// All known moods, in display order.
pub const MOODS: &[Mood] = &[
    mood("happy", "Happy", 8, "😊", "What's making you smile today?", "happy joy"),
    mood("sad", "Sad", 3, "😢", "What's troubling you?", "sad melancholy"),
    mood("angry", "Angry", 2, "😠", "What's causing your frustration?", "angry storm"),
    mood("anxious", "Anxious", 3, "😰", "What's on your mind?", "anxious worried"),
    mood("grateful", "Grateful", 9, "🙏", "What are you grateful for?", "grateful thankful"),
    mood("excited", "Excited", 9, "🤩", "What are you looking forward to?", "excited celebration"),
    mood("tired", "Tired", 4, "😴", "What's draining your energy?", "tired exhausted"),
    mood("calm", "Calm", 7, "😌", "What's bringing you peace?", "calm peaceful"),
    mood("confused", "Confused", 4, "😕", "What's puzzling you?", "confused puzzled"),
    mood("hopeful", "Hopeful", 8, "🤞", "What gives you hope?", "hopeful sunrise"),
    mood("loved", "Loved", 9, "🥰", "What made you feel loved?", "love heart"),
    mood("proud", "Proud", 8, "😎", "What are you proud of?", "proud success"),
    mood("nostalgic", "Nostalgic", 6, "🥹", "What memories are you reflecting on?", "nostalgic memories"),
    mood("inspired", "Inspired", 8, "✨", "What's sparking your creativity?", "inspired creative"),
    mood("frustrated", "Frustrated", 3, "😤", "What's blocking your progress?", "frustrated stress"),
    mood("peaceful", "Peaceful", 8, "🕊️", "What's bringing you tranquility?", "peaceful zen"),
    mood("curious", "Curious", 7, "🤔", "What are you curious about?", "curious wonder"),
    mood("lonely", "Lonely", 3, "🥺", "What's making you feel alone?", "lonely solitude"),
];

/// Looks up a mood by its identifier.
///
/// Matching ignores case and surrounding whitespace, so "Happy" and " HAPPY "
/// both resolve to the `happy` mood.
///
/// # Errors
///
/// Returns `ValidationError::MoodNotFound` for names outside the table.
///
/// # Examples
///
/// ```
/// use reverie::moods::get_mood_by_name;
///
/// let mood = get_mood_by_name("Grateful").unwrap();
/// assert_eq!(mood.score, 9);
/// assert!(get_mood_by_name("elated").is_err());
/// ```
pub fn get_mood_by_name(name: &str) -> AppResult<&'static Mood> {
    let wanted = name.trim();
    MOODS
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            ValidationError::MoodNotFound {
                name: name.to_string(),
            }
            .into()
        })
}

/// Broad direction of a mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Positive,
    Neutral,
    Negative,
}

impl MoodTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTrend::Positive => "positive",
            MoodTrend::Neutral => "neutral",
            MoodTrend::Negative => "negative",
        }
    }
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a (possibly fractional) score into a trend band.
///
/// `score >= 8` is positive, `5 <= score < 8` neutral, anything lower negative.
///
/// ```
/// use reverie::moods::{trend_for_score, MoodTrend};
///
/// assert_eq!(trend_for_score(8.0), MoodTrend::Positive);
/// assert_eq!(trend_for_score(7.9), MoodTrend::Neutral);
/// assert_eq!(trend_for_score(4.9), MoodTrend::Negative);
/// ```
pub fn trend_for_score(score: f64) -> MoodTrend {
    if score >= POSITIVE_TREND_THRESHOLD {
        MoodTrend::Positive
    } else if score >= NEUTRAL_TREND_THRESHOLD {
        MoodTrend::Neutral
    } else {
        MoodTrend::Negative
    }
}
