//! Extremal record selection over one group.

use std::cmp::Ordering;

use log::trace;
use serde::{Deserialize, Serialize};
use tsfold_key::{GroupIdentity, OrderingKey, TotalOrderComparator};
use tsfold_types::{Record, SortDirection};

use crate::{CandidateSet, FilterKind, FilterList, OutputMode, Stream};

/// Selector configuration, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectorConfig {
    /// Filters to run, in filter id order.
    pub filters: FilterList,
    /// Delivery and output order of records.
    pub direction: SortDirection,
    /// Output routing.
    pub mode: OutputMode,
    /// Re-emit every raw record to the debug stream.
    pub emit_all_records: bool,
}

/// One record routed to one output stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emission {
    /// Target stream.
    pub stream: Stream,
    /// Filter that selected the record; `None` for raw debug records.
    pub filter: Option<FilterKind>,
    /// Filter position in the configured list, or the group number for raw
    /// debug records, so every raw row of a group shares one id.
    pub filter_id: usize,
    /// Emitted record.
    pub record: Record,
}

impl Emission {
    /// Filter name, or `all` for raw debug records.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.filter.map_or("all", |kind| kind.name())
    }
}

/// Everything a group produced, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Group the records belong to.
    pub identity: GroupIdentity,
    /// Routed records.
    pub emissions: Vec<Emission>,
}

impl Selection {
    /// Emissions bound for one stream.
    pub fn stream(&self, stream: Stream) -> impl Iterator<Item = &Emission> + '_ {
        self.emissions.iter().filter(move |e| e.stream == stream)
    }
}

/// Runs the configured filters over the records of one group.
#[derive(Debug, Clone)]
pub struct ExtremalSelector {
    config: SelectorConfig,
    order: TotalOrderComparator,
}

impl ExtremalSelector {
    /// Creates a selector.
    #[must_use]
    pub const fn new(config: SelectorConfig) -> Self {
        let order = TotalOrderComparator::new(config.direction);
        Self { config, order }
    }

    /// The selector configuration.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Selects and routes the records of one group.
    ///
    /// `records` must arrive in the configured direction, as the engine
    /// delivers them. `group` is the caller's running group number and tags
    /// raw debug records. Returns `None` only if `records` is empty.
    pub fn select<'a, I>(&self, group: usize, key: &OrderingKey, records: I) -> Option<Selection>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut records = records.into_iter();
        let first = records.next()?;
        let mut emissions = Vec::new();
        let mut set = CandidateSet::new(&self.config.filters, first, key.columns());

        if self.config.emit_all_records {
            emissions.push(raw(group, first));
        }
        let mut previous = first;
        for record in records {
            #[allow(clippy::cast_precision_loss)]
            let ordering = self
                .order
                .compare_values(previous.timestamp as f64, record.timestamp as f64);
            debug_assert_ne!(
                ordering,
                Ordering::Greater,
                "record delivered out of order within group {}",
                key.group_identity()
            );
            if self.config.emit_all_records {
                emissions.push(raw(group, record));
            }
            set.update(record);
            previous = record;
        }

        set.sort_and_mark_dates(&self.order);
        let mode = self.config.mode;
        for candidate in set.candidates() {
            if mode.combines() && candidate.unique_by_date {
                emissions.push(Emission {
                    stream: Stream::Combined,
                    filter: Some(candidate.kind),
                    filter_id: candidate.filter_id,
                    record: candidate.record,
                });
            }
            if mode.splits() {
                for stream in [Stream::Duplicates, Stream::filter(candidate.kind)] {
                    emissions.push(Emission {
                        stream,
                        filter: Some(candidate.kind),
                        filter_id: candidate.filter_id,
                        record: candidate.record,
                    });
                }
            }
        }

        if mode.regresses() {
            set.regress();
            for candidate in set.candidates() {
                if candidate.unique_by_value && candidate.record.adj_close != 0.0 {
                    emissions.push(Emission {
                        stream: Stream::Regressed,
                        filter: Some(candidate.kind),
                        filter_id: candidate.filter_id,
                        record: candidate.record,
                    });
                }
            }
        }

        trace!("group {}: {} emissions", key.group_identity(), emissions.len());
        Some(Selection {
            identity: key.group_identity().clone(),
            emissions,
        })
    }
}

const fn raw(group: usize, record: &Record) -> Emission {
    Emission {
        stream: Stream::AllRecords,
        filter: None,
        filter_id: group,
        record: *record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsfold_types::Period;

    const DAY: i64 = 86_400_000;
    // 2015-01-05T00:00:00Z
    const T1: i64 = 1_420_416_000_000;

    fn selector(filters: &str, mode: OutputMode) -> ExtremalSelector {
        ExtremalSelector::new(SelectorConfig {
            filters: filters.parse().unwrap(),
            direction: SortDirection::Ascending,
            mode,
            emit_all_records: false,
        })
    }

    fn key(rec: &Record) -> OrderingKey {
        OrderingKey::for_record("", "SPX", rec, Period::Month).unwrap()
    }

    fn week() -> Vec<Record> {
        vec![
            Record::new(T1, 10.0, 12.0, 9.0, 11.0, 0, 10.9),
            Record::new(T1 + DAY, 11.0, 15.0, 10.0, 12.0, 300, 11.9),
            Record::new(T1 + 2 * DAY, 9.0, 11.0, 8.0, 10.0, 0, 9.9),
            Record::new(T1 + 3 * DAY, 9.5, 14.0, 8.5, 13.0, 120, 12.9),
        ]
    }

    #[test]
    fn test_extremal_correctness() {
        let records = week();
        let sel = selector("h,lv", OutputMode::Split);
        let selection = sel.select(0, &key(&records[0]), &records).unwrap();

        let high = selection
            .stream(Stream::filter(FilterKind::HighestHigh))
            .next()
            .unwrap();
        assert!(records.iter().all(|r| high.record.high >= r.high));

        let lowest_volume = selection
            .stream(Stream::filter(FilterKind::LowestVolume))
            .next()
            .unwrap();
        assert_eq!(lowest_volume.record.volume, 120);
    }

    #[test]
    fn test_combine_dedups_by_date() {
        let records = week();
        // highest-high and highest-volume both pick the second day.
        let sel = selector("h,hv,l", OutputMode::Combine);
        let selection = sel.select(0, &key(&records[0]), &records).unwrap();

        let combined: Vec<(i64, &str)> = selection
            .stream(Stream::Combined)
            .map(|e| (e.record.timestamp, e.label()))
            .collect();
        assert_eq!(
            combined,
            vec![(T1 + DAY, "highest-high"), (T1 + 2 * DAY, "lowest-low")]
        );
        assert_eq!(selection.emissions.len(), 2);
    }

    #[test]
    fn test_split_keeps_duplicates() {
        let records = week();
        let sel = selector("h,hv", OutputMode::Split);
        let selection = sel.select(0, &key(&records[0]), &records).unwrap();

        assert_eq!(selection.stream(Stream::Duplicates).count(), 2);
        assert_eq!(selection.stream(Stream::filter(FilterKind::HighestVolume)).count(), 1);
        assert_eq!(selection.stream(Stream::Combined).count(), 0);
    }

    #[test]
    fn test_regress_flattens_to_target_field() {
        let records = week();
        let sel = selector("ho", OutputMode::Regress);
        let selection = sel.select(0, &key(&records[0]), &records).unwrap();

        let regressed: Vec<&Emission> = selection.stream(Stream::Regressed).collect();
        assert_eq!(regressed.len(), 1);
        assert_eq!(regressed[0].record.adj_close, 11.0);
        assert_eq!(regressed[0].record.open, 11.0);
    }

    #[test]
    fn test_regress_drops_repeats_and_zeroes() {
        let records = vec![Record::adj_only(T1, 5, 0.0), Record::adj_only(T1 + DAY, 5, 2.0)];
        let sel = selector("o,la,ha,a", OutputMode::Regress);
        let selection = sel.select(0, &key(&records[0]), &records).unwrap();

        // earliest-open and lowest-adjclose regress to 0.0 on the first day;
        // highest-adjclose and latest-adjclose share (day two, 2.0).
        let regressed: Vec<usize> = selection
            .stream(Stream::Regressed)
            .map(|e| e.filter_id)
            .collect();
        assert_eq!(regressed, vec![2]);
    }

    #[test]
    fn test_all_mode_routes_in_order() {
        let records = week();
        let sel = ExtremalSelector::new(SelectorConfig {
            filters: "o,c".parse().unwrap(),
            direction: SortDirection::Ascending,
            mode: OutputMode::All,
            emit_all_records: true,
        });
        let selection = sel.select(7, &key(&records[0]), &records).unwrap();
        let streams: Vec<Stream> = selection.emissions.iter().map(|e| e.stream).collect();

        assert_eq!(
            streams,
            vec![
                Stream::AllRecords,
                Stream::AllRecords,
                Stream::AllRecords,
                Stream::AllRecords,
                Stream::Combined,
                Stream::Duplicates,
                Stream::filter(FilterKind::EarliestOpen),
                Stream::Combined,
                Stream::Duplicates,
                Stream::filter(FilterKind::LatestClose),
                Stream::Regressed,
                Stream::Regressed,
            ]
        );
        let raw_ids: Vec<usize> = selection.stream(Stream::AllRecords).map(|e| e.filter_id).collect();
        assert_eq!(raw_ids, vec![7, 7, 7, 7]);
        assert_eq!(selection.emissions[0].label(), "all");
    }

    #[test]
    fn test_descending_output_order() {
        let mut records = week();
        records.reverse();
        let sel = ExtremalSelector::new(SelectorConfig {
            filters: "o,c".parse().unwrap(),
            direction: SortDirection::Descending,
            mode: OutputMode::Combine,
            emit_all_records: false,
        });
        let selection = sel.select(0, &key(&records[0]), &records).unwrap();
        let labels: Vec<&str> = selection.emissions.iter().map(Emission::label).collect();

        assert_eq!(labels, vec!["latest-close", "earliest-open"]);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: SelectorConfig = serde_json::from_str(r#"{"filters":"h,l"}"#).unwrap();
        assert_eq!(config.mode, OutputMode::All);
        assert_eq!(config.direction, SortDirection::Descending);
        assert!(!config.emit_all_records);
        assert_eq!(config.filters.len(), 2);
    }
}
