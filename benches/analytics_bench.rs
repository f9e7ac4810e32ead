//! Performance benchmarks for mood analytics.
//!
//! Run with: cargo bench
//!
//! These benchmarks establish baseline performance metrics for:
//! - Pure aggregation at various entry counts
//! - The full analytics read path against a SQLite database

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reverie::analytics::compute_analytics;
use reverie::db::entries::{insert_entry, NewEntry};
use reverie::db::Database;
use reverie::ops::{mood_analytics, resolve_owner};
use reverie::{JournalEntry, MOODS};
use tempfile::TempDir;

fn bench_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap()
}

/// Spreads `count` entries over the 30 days before `bench_now()`.
fn sample_entries(count: usize) -> Vec<JournalEntry> {
    (0..count)
        .map(|i| {
            let mood = &MOODS[i % MOODS.len()];
            JournalEntry {
                id: i as i64,
                owner_id: 1,
                collection_id: None,
                title: format!("entry {}", i),
                content: String::new(),
                mood_name: mood.name.to_string(),
                mood_score: mood.score,
                mood_image_url: None,
                created_at: bench_now() - Duration::minutes((i as i64 * 37) % (30 * 24 * 60)),
            }
        })
        .collect()
}

/// Benchmark the pure aggregation with various entry counts.
fn bench_compute_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_analytics");

    for count in [100usize, 1_000, 10_000] {
        let entries = sample_entries(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| {
                let result = compute_analytics(black_box(entries), black_box(30), bench_now())
                    .expect("analytics failed");
                black_box(result);
            });
        });
    }

    group.finish();
}

/// Benchmark the database read plus aggregation.
fn bench_mood_analytics_db(c: &mut Criterion) {
    let mut group = c.benchmark_group("mood_analytics_db");

    let temp_dir = TempDir::new().expect("create temp dir");
    let db = Database::open(&temp_dir.path().join("bench.db")).expect("open database");
    db.initialize_schema().expect("initialize schema");
    let owner = resolve_owner(&db, "bench", bench_now()).expect("resolve owner");

    {
        let conn = db.get_conn().expect("get connection");
        let tx = conn.unchecked_transaction().expect("begin");
        for entry in sample_entries(1_000) {
            let new_entry = NewEntry {
                title: entry.title,
                content: entry.content,
                mood_name: entry.mood_name,
                mood_score: entry.mood_score,
                mood_image_url: None,
                collection_id: None,
            };
            insert_entry(&tx, owner, &new_entry, entry.created_at).expect("insert entry");
        }
        tx.commit().expect("commit");
    }

    for window in [7i64, 30] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &window| {
            b.iter(|| {
                let result = mood_analytics(&db, black_box(owner), window, bench_now())
                    .expect("analytics failed");
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_analytics, bench_mood_analytics_db);
criterion_main!(benches);
