//! Dated OHLCV record representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which price columns were present in the original input.
///
/// Some feeds carry only date, volume and adjusted close. Reducers fall back
/// to the adjusted close for any column that is missing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Columns {
    /// Opening price was supplied.
    pub open: bool,
    /// High price was supplied.
    pub high: bool,
    /// Low price was supplied.
    pub low: bool,
    /// Closing price was supplied.
    pub close: bool,
}

impl Columns {
    /// All four price columns present.
    pub const ALL: Self = Self::new(true, true, true, true);

    /// No price columns present (adjusted close only).
    pub const NONE: Self = Self::new(false, false, false, false);

    /// Creates a presence tag.
    #[must_use]
    pub const fn new(open: bool, high: bool, low: bool, close: bool) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Returns true if every price column is present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.open && self.high && self.low && self.close
    }
}

impl std::fmt::Display for Columns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<&str> = [
            (self.open, "o"),
            (self.high, "h"),
            (self.low, "l"),
            (self.close, "c"),
        ]
        .into_iter()
        .filter_map(|(present, tag)| present.then_some(tag))
        .collect();
        write!(f, "{}", tags.join(","))
    }
}

/// A single dated OHLCV record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Millisecond epoch timestamp (UTC).
    pub timestamp: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: u64,
    /// Adjusted closing price.
    pub adj_close: f64,
    /// Which price columns the input carried.
    pub columns: Columns,
}

impl Record {
    /// Creates a record with all price columns present.
    #[must_use]
    pub const fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        adj_close: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            adj_close,
            columns: Columns::ALL,
        }
    }

    /// Creates a record from a feed that only carries volume and adjusted close.
    #[must_use]
    pub const fn adj_only(timestamp: i64, volume: u64, adj_close: f64) -> Self {
        Self {
            timestamp,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume,
            adj_close,
            columns: Columns::NONE,
        }
    }

    /// Replaces the presence tag.
    #[must_use]
    pub const fn with_columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    /// Returns the timestamp as a UTC date time, if representable.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }

    /// Opening price, or adjusted close when `columns` lacks an open.
    #[must_use]
    pub const fn open_or_adj(&self, columns: Columns) -> f64 {
        if columns.open { self.open } else { self.adj_close }
    }

    /// High price, or adjusted close when `columns` lacks a high.
    #[must_use]
    pub const fn high_or_adj(&self, columns: Columns) -> f64 {
        if columns.high { self.high } else { self.adj_close }
    }

    /// Low price, or adjusted close when `columns` lacks a low.
    #[must_use]
    pub const fn low_or_adj(&self, columns: Columns) -> f64 {
        if columns.low { self.low } else { self.adj_close }
    }

    /// Closing price, or adjusted close when `columns` lacks a close.
    #[must_use]
    pub const fn close_or_adj(&self, columns: Columns) -> f64 {
        if columns.close { self.close } else { self.adj_close }
    }
}
