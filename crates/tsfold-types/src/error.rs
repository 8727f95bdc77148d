//! Error types for tsfold.

use thiserror::Error;

/// Result type alias for tsfold operations.
pub type Result<T> = std::result::Result<T, TsfoldError>;

/// Errors raised while validating configuration or deriving keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TsfoldError {
    /// Timestamp cannot be represented as a calendar date.
    #[error("Invalid timestamp: {0} ms")]
    InvalidTimestamp(i64),

    /// Unrecognized period granularity.
    #[error("invalid period '{0}', expected one of: y, q, m, w, d")]
    UnknownPeriod(String),

    /// Unrecognized sort direction.
    #[error("invalid sort direction '{0}', expected asc or desc")]
    UnknownDirection(String),

    /// Unrecognized record filter name.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A selection job was configured without any filter.
    #[error("Filter list is empty")]
    EmptyFilterList,

    /// Unrecognized output mode.
    #[error("invalid output mode '{0}', expected one of: s, c, r, a")]
    UnknownOutputMode(String),

    /// A group identity was built without a period bucket.
    #[error("Group identity requires a period bucket")]
    EmptyPeriodBucket,

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
