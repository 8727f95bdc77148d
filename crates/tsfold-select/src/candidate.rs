//! Per-group filter candidates.

use std::collections::HashSet;

use tsfold_key::TotalOrderComparator;
use tsfold_types::{Columns, Record};

use crate::{Field, FilterKind, FilterList};

/// Current best record of one configured filter within a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCandidate {
    /// Filter kind.
    pub kind: FilterKind,
    /// Position of the filter in the configured list.
    pub filter_id: usize,
    /// Selected record.
    pub record: Record,
    /// False if an earlier candidate in sort order has the same timestamp.
    pub unique_by_date: bool,
    /// False if an earlier candidate has the same timestamp and regressed value.
    pub unique_by_value: bool,
}

impl FilterCandidate {
    const fn new(kind: FilterKind, filter_id: usize, record: Record) -> Self {
        Self {
            kind,
            filter_id,
            record,
            unique_by_date: true,
            unique_by_value: true,
        }
    }

    /// Filter name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// The candidates of every configured filter for one group.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    candidates: Vec<FilterCandidate>,
    columns: Columns,
}

impl CandidateSet {
    /// Seeds every filter with the first record of a group.
    #[must_use]
    pub fn new(filters: &FilterList, first: &Record, columns: Columns) -> Self {
        let candidates = filters
            .iter()
            .map(|(id, kind)| FilterCandidate::new(kind, id, *first))
            .collect();
        Self {
            candidates,
            columns,
        }
    }

    /// Offers the next record of the group to every filter.
    pub fn update(&mut self, incoming: &Record) {
        for candidate in &mut self.candidates {
            if candidate.kind.replaces(&candidate.record, incoming) {
                candidate.record = *incoming;
            }
        }
    }

    /// Candidates in their current order.
    #[must_use]
    pub fn candidates(&self) -> &[FilterCandidate] {
        &self.candidates
    }

    /// Sorts candidates by timestamp and marks repeated dates.
    ///
    /// The sort is stable, so equal timestamps keep filter order and the
    /// lowest filter id stays unique.
    pub fn sort_and_mark_dates(&mut self, order: &TotalOrderComparator) {
        #[allow(clippy::cast_precision_loss)]
        self.candidates.sort_by(|a, b| {
            order.compare_values(a.record.timestamp as f64, b.record.timestamp as f64)
        });
        let mut seen = HashSet::new();
        for candidate in &mut self.candidates {
            candidate.unique_by_date = seen.insert(candidate.record.timestamp);
        }
    }

    /// Copies each filter's target field into the adjusted close and marks
    /// repeated `(timestamp, value)` pairs.
    ///
    /// Volume and adjusted close filters keep the adjusted close as is.
    /// Price columns missing from the input resolve to the adjusted close.
    pub fn regress(&mut self) {
        let columns = self.columns;
        let mut seen = HashSet::new();
        for candidate in &mut self.candidates {
            if let Some(field) = candidate.kind.definition().regress {
                candidate.record.adj_close = regressed_value(field, &candidate.record, columns);
            }
            let pair = (candidate.record.timestamp, candidate.record.adj_close.to_bits());
            candidate.unique_by_value = seen.insert(pair);
        }
    }

    /// Consumes the set, returning its candidates.
    #[must_use]
    pub fn into_candidates(self) -> Vec<FilterCandidate> {
        self.candidates
    }
}

fn regressed_value(field: Field, record: &Record, columns: Columns) -> f64 {
    match field {
        Field::Open => record.open_or_adj(columns),
        Field::High => record.high_or_adj(columns),
        Field::Low => record.low_or_adj(columns),
        Field::Close => record.close_or_adj(columns),
        Field::AdjClose | Field::Timestamp | Field::Volume => record.adj_close,
    }
}
