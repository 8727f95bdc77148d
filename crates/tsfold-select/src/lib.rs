//! Extremal record selection within consolidation periods.
//!
//! Where [`tsfold-aggregate`](https://docs.rs/tsfold-aggregate) reduces a
//! period to one bar stamped at the period end, this crate keeps the actual
//! records on which events happened: the day with the highest high, the day
//! with the lowest non-zero volume, and so on.
//!
//! - [`FilterKind`] - The filter catalogue, one table row per kind
//! - [`FilterList`] - Ordered, validated filter configuration
//! - [`OutputMode`] / [`Stream`] - Output routing
//! - [`ExtremalSelector`] - Runs the filters over one group

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candidate;
mod filter;
mod mode;
mod selector;

pub use candidate::{CandidateSet, FilterCandidate};
pub use filter::{CATALOGUE, Field, FilterKind, FilterList, FilterDef, ReplaceRule};
pub use mode::{OutputMode, Stream};
pub use selector::{Emission, ExtremalSelector, Selection, SelectorConfig};
