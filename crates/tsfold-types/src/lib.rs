//! Core types for the tsfold time series consolidator.
//!
//! This crate provides the fundamental data structures used throughout tsfold:
//!
//! - [`Record`] - A dated OHLCV record with adjusted close
//! - [`Columns`] - Which price columns the input actually carried
//! - [`Period`] - Calendar consolidation granularity and its bucket labels
//! - [`SortDirection`] - Ascending or descending record order

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod direction;
mod error;
mod period;
mod record;

pub use direction::SortDirection;
pub use error::{Result, TsfoldError};
pub use period::{Period, bucket};
pub use record::{Columns, Record};
