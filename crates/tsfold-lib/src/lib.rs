//! Period consolidation and extremal record selection for OHLCV series.
//!
//! This is a facade crate that re-exports functionality from the tsfold
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tsfold_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let filters: FilterList = "h,l,lv".parse()?;
//!     let engine = Engine::new(JobConfig::select(Period::Month, filters))?;
//!     let output = engine.run_reader(std::fs::File::open("spx.csv")?, "SPX")?;
//!
//!     SinkWriter::new("out").write(&engine, &output)?;
//!     println!("{} groups", output.stats.groups);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tsfold_types::*;

// Re-export keys and comparators
pub use tsfold_key::{
    GroupComparator, GroupIdentity, KeyComparator, KeyedRecord, OrderingKey,
    TotalOrderComparator, compare_group_only, partition, partition_identity,
};

// Re-export consolidation
pub use tsfold_aggregate::{ConsolidatedSummary, PeriodAggregator, SummaryBuilder, consolidate};

// Re-export selection
#[cfg(feature = "select")]
pub use tsfold_select::{
    CATALOGUE, CandidateSet, Emission, ExtremalSelector, Field, FilterCandidate, FilterKind,
    FilterList, FilterDef, OutputMode, ReplaceRule, Selection, SelectorConfig, Stream,
};

// Re-export formats
#[cfg(feature = "format")]
pub use tsfold_format::{
    Column, ColumnTemplate, FormatError, IngestStats, Ingestor, OutputRow, ParsedRecord,
};

// Re-export the engine
#[cfg(feature = "engine")]
pub use tsfold_engine::{
    Engine, EngineError, JobConfig, JobKind, JobOutput, RunStats, Sink, SinkWriter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tsfold_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tsfold_types::{Columns, Period, Record, SortDirection, TsfoldError};

    pub use tsfold_key::{GroupIdentity, KeyedRecord, OrderingKey};

    pub use tsfold_aggregate::{ConsolidatedSummary, PeriodAggregator};

    #[cfg(feature = "select")]
    pub use tsfold_select::{ExtremalSelector, FilterKind, FilterList, OutputMode, Stream};

    #[cfg(feature = "format")]
    pub use tsfold_format::{ColumnTemplate, Ingestor};

    #[cfg(feature = "engine")]
    pub use tsfold_engine::{Engine, JobConfig, Sink, SinkWriter};
}
