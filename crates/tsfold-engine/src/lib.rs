//! In-process execution of tsfold jobs.
//!
//! - [`JobConfig`] - Serializable job configuration
//! - [`Engine`] - Partition, sort, delimit and reduce
//! - [`Sink`] - Named output sinks
//! - [`SinkWriter`] - Writes sink lines and run statistics to disk

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod sink;
mod stats;
mod writer;

pub use config::{JobConfig, JobKind};
pub use engine::{Engine, JobOutput};
pub use error::{EngineError, Result};
pub use sink::Sink;
pub use stats::RunStats;
pub use writer::SinkWriter;
