//! History queries
//!
//! This module answers filtered queries over an account's append-only
//! history. Entries are stored oldest first with non decreasing timestamps,
//! so date bounds resolve with a binary search instead of a full scan.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{EntryKind, LedgerEntry};

/// Filter applied to history queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryFilter {
    pub kind: Option<EntryKind>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl HistoryFilter {
    pub fn credits() -> Self {
        Self {
            kind: Some(EntryKind::Credit),
            ..Self::default()
        }
    }

    pub fn debits() -> Self {
        Self {
            kind: Some(EntryKind::Debit),
            ..Self::default()
        }
    }

    pub fn between(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self {
            kind: None,
            from,
            to,
        }
    }

    fn kind_matches(&self, entry: &LedgerEntry) -> bool {
        self.kind.map_or(true, |kind| entry.kind == kind)
    }
}

// Both bounds are inclusive
fn range_bounds(entries: &[LedgerEntry], filter: &HistoryFilter) -> (usize, usize) {
    let start = match filter.from {
        Some(from) => entries.partition_point(|entry| entry.timestamp < from),
        None => 0,
    };
    let end = match filter.to {
        Some(to) => entries.partition_point(|entry| entry.timestamp <= to),
        None => entries.len(),
    };

    (start, end.max(start))
}

/// Query matching entries, most recent first
pub fn query(entries: &[LedgerEntry], filter: &HistoryFilter) -> Vec<LedgerEntry> {
    let (start, end) = range_bounds(entries, filter);

    entries[start..end]
        .iter()
        .rev()
        .filter(|entry| filter.kind_matches(entry))
        .cloned()
        .collect()
}

/// Sum of matching entry amounts
pub fn sum(entries: &[LedgerEntry], filter: &HistoryFilter) -> Decimal {
    let (start, end) = range_bounds(entries, filter);

    entries[start..end]
        .iter()
        .filter(|entry| filter.kind_matches(entry))
        .map(|entry| entry.amount)
        .sum()
}

/// Total debited within an optional date range
pub fn total_spent(
    entries: &[LedgerEntry],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Decimal {
    sum(
        entries,
        &HistoryFilter {
            kind: Some(EntryKind::Debit),
            from,
            to,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn sample_entries() -> (Vec<LedgerEntry>, DateTime<Utc>) {
        let base = Utc::now() - Duration::days(10);
        let mut entries = Vec::new();

        for (offset_days, kind, amount, description) in [
            (0i64, EntryKind::Credit, dec!(500), "Added funds"),
            (1, EntryKind::Debit, dec!(200), "Payment"),
            (2, EntryKind::Credit, dec!(50), "Added funds"),
            (3, EntryKind::Debit, dec!(75), "Payment"),
            (4, EntryKind::Debit, dec!(25), "Payment"),
        ] {
            let mut entry = match kind {
                EntryKind::Credit => LedgerEntry::credit(amount, description),
                EntryKind::Debit => LedgerEntry::debit(amount, description),
            };
            entry.timestamp = base + Duration::days(offset_days);
            entries.push(entry);
        }

        (entries, base)
    }

    #[test]
    fn test_query_returns_most_recent_first() {
        let (entries, _) = sample_entries();

        let result = query(&entries, &HistoryFilter::default());

        assert_eq!(result.len(), 5);
        for pair in result.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(result[0].amount, dec!(25));
        assert_eq!(result[4].amount, dec!(500));
    }

    #[test]
    fn test_query_filters_by_kind() {
        let (entries, _) = sample_entries();

        let debits = query(&entries, &HistoryFilter::debits());

        assert_eq!(debits.len(), 3);
        assert!(debits.iter().all(|entry| entry.kind == EntryKind::Debit));
    }

    #[test]
    fn test_query_date_range_is_inclusive() {
        let (entries, base) = sample_entries();

        let filter = HistoryFilter::between(
            Some(base + Duration::days(1)),
            Some(base + Duration::days(3)),
        );
        let result = query(&entries, &filter);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].amount, dec!(75));
        assert_eq!(result[2].amount, dec!(200));
    }

    #[test]
    fn test_sum_matches_independent_aggregate() {
        let (entries, _) = sample_entries();

        let filter = HistoryFilter::debits();
        let total = sum(&entries, &filter);

        let expected: Decimal = entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::Debit)
            .map(|entry| entry.amount)
            .sum();

        assert_eq!(total, expected);
        assert_eq!(total, dec!(300));
    }

    #[test]
    fn test_total_spent_respects_range() {
        let (entries, base) = sample_entries();

        let all_time = total_spent(&entries, None, None);
        assert_eq!(all_time, dec!(300));

        let late_window = total_spent(&entries, Some(base + Duration::days(4)), None);
        assert_eq!(late_window, dec!(25));
    }

    #[test]
    fn test_empty_history() {
        let entries: Vec<LedgerEntry> = Vec::new();

        assert!(query(&entries, &HistoryFilter::default()).is_empty());
        assert_eq!(sum(&entries, &HistoryFilter::default()), Decimal::ZERO);
    }
}
