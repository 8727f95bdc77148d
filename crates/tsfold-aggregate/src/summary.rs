//! Consolidated period summary.

use tsfold_key::GroupIdentity;
use tsfold_types::{Columns, Record};

/// One consolidated OHLCV bar per reduce group.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedSummary {
    /// Group the summary belongs to.
    pub identity: GroupIdentity,
    /// Opening price of the earliest record.
    pub open: f64,
    /// Highest high of the period.
    pub high: f64,
    /// Lowest low of the period.
    pub low: f64,
    /// Closing price of the latest record.
    pub close: f64,
    /// Total volume of the period.
    pub volume: u64,
    /// Adjusted close of the latest record.
    pub adj_close: f64,
    /// Timestamp of the latest record (period end).
    pub period_end: i64,
}

impl ConsolidatedSummary {
    /// Returns the summary as a plain record stamped at the period end.
    ///
    /// Every price column is filled in, so the record carries a complete
    /// presence tag and can be fed into a coarser consolidation.
    #[must_use]
    pub const fn to_record(&self) -> Record {
        Record {
            timestamp: self.period_end,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            adj_close: self.adj_close,
            columns: Columns::ALL,
        }
    }
}
