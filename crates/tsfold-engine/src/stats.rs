//! Run statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tsfold_format::IngestStats;

/// Counters of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Ingestion line counters.
    pub ingest: IngestStats,
    /// Records handed to the engine.
    pub records: u64,
    /// Groups reduced.
    pub groups: u64,
    /// Shards used.
    pub shards: usize,
    /// Rows written per sink name.
    pub rows: BTreeMap<String, u64>,
}

impl RunStats {
    /// Total rows across all sinks.
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.rows.values().sum()
    }
}
