use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use reverie::analytics::compute_analytics;
use reverie::{JournalEntry, MOODS};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 15, 18, 0, 0).unwrap()
}

/// Entries up to 40 days before `now()` and a few hours after it.
fn entries() -> impl Strategy<Value = Vec<JournalEntry>> {
    prop::collection::vec(
        (0..MOODS.len(), -(40 * 24 * 60)..(6 * 60i64)),
        0..60,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (mood_idx, offset_minutes))| {
                let mood = &MOODS[mood_idx];
                JournalEntry {
                    id: i as i64 + 1,
                    owner_id: 1,
                    collection_id: None,
                    title: format!("entry {}", i),
                    content: String::new(),
                    mood_name: mood.name.to_string(),
                    mood_score: mood.score,
                    mood_image_url: None,
                    created_at: now() + Duration::minutes(offset_minutes),
                }
            })
            .collect()
    })
}

fn in_window(entries: &[JournalEntry], window_days: i64) -> Vec<&JournalEntry> {
    let start = now() - Duration::days(window_days);
    entries
        .iter()
        .filter(|e| e.created_at >= start && e.created_at <= now())
        .collect()
}

#[test]
fn bucket_counts_sum_to_total() {
    proptest!(|(entries in entries(), window in 1i64..45)| {
        let result = compute_analytics(&entries, window, now()).unwrap();
        let counted: usize = result.timeline.iter().map(|d| d.entry_count).sum();
        prop_assert_eq!(counted, result.total_entries);
        prop_assert_eq!(result.total_entries, in_window(&entries, window).len());
    });
}

#[test]
fn timeline_is_strictly_ascending_without_empty_days() {
    proptest!(|(entries in entries(), window in 1i64..45)| {
        let result = compute_analytics(&entries, window, now()).unwrap();
        for pair in result.timeline.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
        prop_assert!(result.timeline.iter().all(|d| d.entry_count > 0));
    });
}

#[test]
fn average_is_flat_mean_of_scores() {
    proptest!(|(entries in entries(), window in 1i64..45)| {
        let result = compute_analytics(&entries, window, now()).unwrap();
        let kept = in_window(&entries, window);
        if kept.is_empty() {
            prop_assert_eq!(result.average_score, 0.0);
            prop_assert!(result.most_frequent_mood.is_none());
        } else {
            let mean = kept.iter().map(|e| f64::from(e.mood_score)).sum::<f64>() / kept.len() as f64;
            prop_assert!((result.average_score - mean).abs() <= 0.05 + 1e-9);
            prop_assert!((1.0..=10.0).contains(&result.average_score));
        }
    });
}

#[test]
fn daily_average_uses_window_length() {
    proptest!(|(entries in entries(), window in 1i64..45)| {
        let result = compute_analytics(&entries, window, now()).unwrap();
        let expected = result.total_entries as f64 / window as f64;
        prop_assert!((result.daily_average - expected).abs() < 1e-12);
    });
}

#[test]
fn most_frequent_mood_has_maximal_count() {
    proptest!(|(entries in entries(), window in 1i64..45)| {
        let result = compute_analytics(&entries, window, now()).unwrap();
        let kept = in_window(&entries, window);
        if let Some(winner) = result.most_frequent_mood {
            let count = |name: &str| kept.iter().filter(|e| e.mood_name == name).count();
            let best = kept.iter().map(|e| count(&e.mood_name)).max().unwrap_or(0);
            prop_assert_eq!(count(&winner), best);
        }
    });
}

#[test]
fn aggregation_is_deterministic() {
    proptest!(|(entries in entries(), window in 1i64..45)| {
        let first = compute_analytics(&entries, window, now()).unwrap();
        let second = compute_analytics(&entries, window, now()).unwrap();
        prop_assert_eq!(first, second);
    });
}

#[test]
fn non_positive_windows_are_rejected() {
    proptest!(|(entries in entries(), window in i64::MIN..=0)| {
        prop_assert!(compute_analytics(&entries, window, now()).is_err());
    });
}
