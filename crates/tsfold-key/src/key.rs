//! Composite ordering key.

use tsfold_types::{Columns, Period, Record, Result};

use crate::GroupIdentity;

/// Composite key handed to the group-by-then-sort engine.
///
/// The group identity decides which reduce group a record joins; the sort
/// value (the record timestamp) orders records inside that group. The
/// presence tag travels with the key so reducers know which price columns
/// the group's input schema carried.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingKey {
    identity: GroupIdentity,
    sort_value: f64,
    columns: Columns,
}

impl OrderingKey {
    /// Creates a key from its parts.
    #[must_use]
    pub const fn new(identity: GroupIdentity, sort_value: f64, columns: Columns) -> Self {
        Self {
            identity,
            sort_value,
            columns,
        }
    }

    /// Derives the key of a record for the given consolidation period.
    ///
    /// # Errors
    ///
    /// Returns an error if the record timestamp has no calendar bucket.
    pub fn for_record(
        exchange: &str,
        symbol: &str,
        record: &Record,
        period: Period,
    ) -> Result<Self> {
        let bucket = period.bucket(record.timestamp)?;
        let identity = GroupIdentity::new(exchange, symbol, bucket)?;
        #[allow(clippy::cast_precision_loss)]
        let sort_value = record.timestamp as f64;
        Ok(Self::new(identity, sort_value, record.columns))
    }

    /// The group identity projection of this key.
    #[must_use]
    pub const fn group_identity(&self) -> &GroupIdentity {
        &self.identity
    }

    /// The secondary sort value.
    #[must_use]
    pub const fn sort_value(&self) -> f64 {
        self.sort_value
    }

    /// Presence tag of the input columns.
    #[must_use]
    pub const fn columns(&self) -> Columns {
        self.columns
    }
}

impl std::fmt::Display for OrderingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.identity, self.sort_value)
    }
}

/// A record paired with its derived ordering key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRecord {
    /// Shuffle key.
    pub key: OrderingKey,
    /// Record payload.
    pub record: Record,
}

impl KeyedRecord {
    /// Derives the key for `record` and pairs them.
    ///
    /// # Errors
    ///
    /// Returns an error if the record timestamp has no calendar bucket.
    pub fn new(exchange: &str, symbol: &str, record: Record, period: Period) -> Result<Self> {
        let key = OrderingKey::for_record(exchange, symbol, &record, period)?;
        Ok(Self { key, record })
    }
}
