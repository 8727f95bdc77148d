//! Period OHLCV consolidation for tsfold.
//!
//! This crate folds the records of a reduce group into one bar:
//!
//! - [`ConsolidatedSummary`] - The consolidated bar of one group
//! - [`SummaryBuilder`] - Per-group fold
//! - [`PeriodAggregator`] - Streaming aggregator that detects group boundaries

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod summary;

pub use aggregator::{PeriodAggregator, SummaryBuilder, consolidate};
pub use summary::ConsolidatedSummary;
