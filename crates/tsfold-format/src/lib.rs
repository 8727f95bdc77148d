//! Line formats for tsfold.
//!
//! - [`Column`] / [`ColumnTemplate`] - Ordered output and input column tags
//! - [`OutputRow`] - A record with the context needed to render it
//! - [`Ingestor`] - CSV ingestion with schema inference and counters

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod column;
mod error;
mod ingest;
mod row;
mod template;

pub use column::Column;
pub use error::{FormatError, Result};
pub use ingest::{IngestStats, Ingestor, ParsedRecord};
pub use row::OutputRow;
pub use template::ColumnTemplate;
