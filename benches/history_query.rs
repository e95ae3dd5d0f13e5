//! Benchmarks for history queries over a well-aged account.

use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use kartpay_wallet_ledger::core::history;
use kartpay_wallet_ledger::{HistoryFilter, LedgerEntry};

const HISTORY_LEN: usize = 10_000;

/// One entry per minute starting from a fixed date, two thirds debits
fn build_history() -> Vec<LedgerEntry> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    (0..HISTORY_LEN)
        .map(|i| {
            let mut entry = if i % 3 == 0 {
                LedgerEntry::credit(Decimal::from(100), "Added funds")
            } else {
                LedgerEntry::debit(Decimal::from(25), "Payment")
            };
            entry.timestamp = base + Duration::minutes(i as i64);
            entry
        })
        .collect()
}

fn bench_history_queries(c: &mut Criterion) {
    let entries = build_history();
    let base = entries[0].timestamp;

    let mut group = c.benchmark_group("history");

    group.bench_function("query_unfiltered", |b| {
        let filter = HistoryFilter::default();
        b.iter(|| history::query(black_box(&entries), black_box(&filter)))
    });

    group.bench_function("query_one_day_window", |b| {
        let filter = HistoryFilter::between(
            Some(base + Duration::days(3)),
            Some(base + Duration::days(4)),
        );
        b.iter(|| history::query(black_box(&entries), black_box(&filter)))
    });

    group.bench_function("sum_debits", |b| {
        let filter = HistoryFilter::debits();
        b.iter(|| history::sum(black_box(&entries), black_box(&filter)))
    });

    group.bench_function("total_spent_window", |b| {
        let from = Some(base + Duration::days(1));
        let to = Some(base + Duration::days(5));
        b.iter(|| history::total_spent(black_box(&entries), black_box(from), black_box(to)))
    });

    group.finish();
}

criterion_group!(benches, bench_history_queries);
criterion_main!(benches);
