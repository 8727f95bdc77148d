//! Streaming period aggregation.

use std::cmp::Ordering;

use log::debug;
use tsfold_key::{GroupComparator, GroupIdentity, KeyComparator, OrderingKey, TotalOrderComparator};
use tsfold_types::{Columns, Record, SortDirection};

use crate::ConsolidatedSummary;

/// Folds the records of one group into a [`ConsolidatedSummary`].
///
/// The builder tracks the earliest and latest record by timestamp, so it
/// gives the same result whichever direction the group is delivered in.
/// Missing price columns fall back to the adjusted close; the presence tag
/// is fixed when the builder is created.
#[derive(Debug)]
pub struct SummaryBuilder {
    identity: GroupIdentity,
    columns: Columns,
    earliest: Record,
    latest: Record,
    high: f64,
    low: f64,
    volume: u64,
    count: usize,
}

impl SummaryBuilder {
    /// Creates a new builder from the first record of a group.
    #[must_use]
    pub fn new(key: &OrderingKey, first: &Record) -> Self {
        let columns = key.columns();
        Self {
            identity: key.group_identity().clone(),
            columns,
            earliest: *first,
            latest: *first,
            high: first.high_or_adj(columns),
            low: first.low_or_adj(columns),
            volume: first.volume,
            count: 1,
        }
    }

    /// Updates the builder with the next record of the group.
    pub fn update(&mut self, record: &Record) {
        if record.timestamp < self.earliest.timestamp {
            self.earliest = *record;
        }
        if record.timestamp > self.latest.timestamp {
            self.latest = *record;
        }
        self.high = self.high.max(record.high_or_adj(self.columns));
        self.low = self.low.min(record.low_or_adj(self.columns));
        self.volume = self.volume.saturating_add(record.volume);
        self.count += 1;
    }

    /// Number of records folded so far, the first one included.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.count
    }

    /// Finishes the fold and returns the summary.
    #[must_use]
    pub fn finish(self) -> ConsolidatedSummary {
        ConsolidatedSummary {
            open: self.earliest.open_or_adj(self.columns),
            high: self.high,
            low: self.low,
            close: self.latest.close_or_adj(self.columns),
            volume: self.volume,
            adj_close: self.latest.adj_close,
            period_end: self.latest.timestamp,
            identity: self.identity,
        }
    }
}

/// Consolidates one group's records.
///
/// Returns `None` only if `records` is empty.
pub fn consolidate<'a, I>(key: &OrderingKey, records: I) -> Option<ConsolidatedSummary>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut records = records.into_iter();
    let mut builder = SummaryBuilder::new(key, records.next()?);
    for record in records {
        builder.update(record);
    }
    Some(builder.finish())
}

/// Streaming period aggregator.
///
/// Consumes keyed records in engine order and emits a summary each time a
/// new group starts.
#[derive(Debug)]
pub struct PeriodAggregator {
    groups: GroupComparator,
    order: TotalOrderComparator,
    current: Option<(OrderingKey, SummaryBuilder)>,
}

impl PeriodAggregator {
    /// Creates a new aggregator for records sorted in `direction`.
    #[must_use]
    pub const fn new(direction: SortDirection) -> Self {
        Self {
            groups: GroupComparator::new(direction),
            order: TotalOrderComparator::new(direction),
            current: None,
        }
    }

    /// Processes a record, potentially emitting the completed previous group.
    ///
    /// Returns `Some(summary)` when `key` starts a new group,
    /// `None` otherwise.
    pub fn process(&mut self, key: &OrderingKey, record: &Record) -> Option<ConsolidatedSummary> {
        match self.current.take() {
            Some((last, mut builder)) if self.groups.same_group(&last, key) => {
                debug_assert_ne!(
                    self.order.compare(&last, key),
                    Ordering::Greater,
                    "record delivered out of order within group {}",
                    key.group_identity()
                );
                builder.update(record);
                self.current = Some((key.clone(), builder));
                None
            }
            Some((last, builder)) => {
                debug_assert_ne!(
                    self.groups.compare(&last, key),
                    Ordering::Greater,
                    "group {} delivered out of order",
                    key.group_identity()
                );
                debug!("group {} complete ({} records)", last.group_identity(), builder.record_count());
                let completed = builder.finish();
                self.current = Some((key.clone(), SummaryBuilder::new(key, record)));
                Some(completed)
            }
            None => {
                self.current = Some((key.clone(), SummaryBuilder::new(key, record)));
                None
            }
        }
    }

    /// Finishes aggregation, returning the last group's summary.
    #[must_use]
    pub fn finish(self) -> Option<ConsolidatedSummary> {
        self.current.map(|(_, builder)| builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tsfold_types::Period;

    const DAY: i64 = 86_400_000;
    // 2015-01-05T00:00:00Z
    const T1: i64 = 1_420_416_000_000;

    fn keyed(rec: Record) -> (OrderingKey, Record) {
        (OrderingKey::for_record("", "SPX", &rec, Period::Month).unwrap(), rec)
    }

    fn three_days() -> Vec<Record> {
        vec![
            Record::new(T1, 10.0, 12.0, 9.0, 11.0, 100, 10.9),
            Record::new(T1 + DAY, 11.0, 13.0, 10.0, 12.0, 200, 11.9),
            Record::new(T1 + 2 * DAY, 9.0, 11.0, 8.0, 10.0, 150, 9.9),
        ]
    }

    #[test]
    fn test_consolidate_all_columns() {
        let records = three_days();
        let (key, _) = keyed(records[0]);
        let summary = consolidate(&key, &records).unwrap();

        assert_relative_eq!(summary.open, 10.0);
        assert_relative_eq!(summary.high, 13.0);
        assert_relative_eq!(summary.low, 8.0);
        assert_relative_eq!(summary.close, 10.0);
        assert_eq!(summary.volume, 450);
        assert_relative_eq!(summary.adj_close, 9.9);
        assert_eq!(summary.period_end, T1 + 2 * DAY);
        assert_eq!(summary.identity.as_str(), "SPX-2015-01");
    }

    #[test]
    fn test_consolidate_is_direction_agnostic() {
        let mut records = three_days();
        let (key, _) = keyed(records[0]);
        let ascending = consolidate(&key, &records).unwrap();
        records.reverse();
        let descending = consolidate(&key, &records).unwrap();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_adj_close_fallback() {
        let records = vec![
            Record::adj_only(T1 + 2 * DAY, 10, 5.0),
            Record::adj_only(T1 + DAY, 20, 7.0),
            Record::adj_only(T1, 30, 4.0),
        ];
        let (key, _) = keyed(records[0]);
        let summary = consolidate(&key, &records).unwrap();

        assert_relative_eq!(summary.open, 4.0);
        assert_relative_eq!(summary.high, 7.0);
        assert_relative_eq!(summary.low, 4.0);
        assert_relative_eq!(summary.close, 5.0);
        assert_eq!(summary.volume, 60);
    }

    #[test]
    fn test_single_record_group() {
        let rec = Record::adj_only(T1, 77, 3.25);
        let (key, _) = keyed(rec);
        let summary = consolidate(&key, [&rec]).unwrap();

        assert_relative_eq!(summary.open, 3.25);
        assert_relative_eq!(summary.high, 3.25);
        assert_relative_eq!(summary.low, 3.25);
        assert_relative_eq!(summary.close, 3.25);
        assert_eq!(summary.volume, 77);
    }

    #[test]
    fn test_empty_group() {
        let (key, _) = keyed(three_days()[0]);
        assert!(consolidate(&key, std::iter::empty()).is_none());
    }

    #[test]
    fn test_streaming_emits_on_group_change() {
        let mut agg = PeriodAggregator::new(SortDirection::Descending);
        let feb = T1 + 31 * DAY;

        // Descending order: February first, then January.
        let (k1, r1) = keyed(Record::adj_only(feb + DAY, 1, 2.0));
        let (k2, r2) = keyed(Record::adj_only(feb, 1, 3.0));
        let (k3, r3) = keyed(Record::adj_only(T1, 5, 1.0));

        assert!(agg.process(&k1, &r1).is_none());
        assert!(agg.process(&k2, &r2).is_none());

        let february = agg.process(&k3, &r3).unwrap();
        assert_eq!(february.identity.as_str(), "SPX-2015-02");
        assert_eq!(february.volume, 2);
        assert_relative_eq!(february.open, 3.0);
        assert_relative_eq!(february.close, 2.0);

        let january = agg.finish().unwrap();
        assert_eq!(january.identity.as_str(), "SPX-2015-01");
        assert_eq!(january.volume, 5);
    }

    #[test]
    fn test_builder_record_count() {
        let records = three_days();
        let (key, _) = keyed(records[0]);
        let mut builder = SummaryBuilder::new(&key, &records[0]);
        assert_eq!(builder.record_count(), 1);
        builder.update(&records[1]);
        assert_eq!(builder.record_count(), 2);
    }
}
