//! Calendar consolidation periods and their bucket labels.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Result, TsfoldError};

/// Calendar period that records are consolidated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// One bucket per calendar year.
    Year,
    /// One bucket per calendar quarter.
    Quarter,
    /// One bucket per calendar month.
    #[default]
    Month,
    /// One bucket per ISO week, labelled with the ISO week-numbering year.
    Week,
    /// One bucket per day of the year.
    Day,
}

impl Period {
    /// Returns the period as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }

    /// Returns the single letter code used on the command line.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::Quarter => "q",
            Self::Month => "m",
            Self::Week => "w",
            Self::Day => "d",
        }
    }

    /// Returns all available periods, coarsest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Year, Self::Quarter, Self::Month, Self::Week, Self::Day]
    }

    /// Computes the bucket label for a millisecond epoch timestamp.
    ///
    /// Labels are `YYYY`, `YYYY-QQ`, `YYYY-MM`, `YYYY-WW` or `YYYY-DDD`.
    /// Dates are interpreted in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TsfoldError::InvalidTimestamp`] when the timestamp is outside
    /// the representable calendar range.
    pub fn bucket(&self, timestamp: i64) -> Result<String> {
        let dt = DateTime::<Utc>::from_timestamp_millis(timestamp)
            .ok_or(TsfoldError::InvalidTimestamp(timestamp))?;
        let year = dt.year();

        let label = match self {
            Self::Year => format!("{year:04}"),
            Self::Quarter => format!("{year:04}-{:02}", dt.month().div_ceil(3)),
            Self::Month => format!("{year:04}-{:02}", dt.month()),
            Self::Day => format!("{year:04}-{:03}", dt.ordinal()),
            Self::Week => {
                // Week-numbering year: late December days in week 1 move to the
                // next year, early January days in week 52 or 53 to the previous.
                let week = dt.iso_week();
                format!("{:04}-{:02}", week.year(), week.week())
            }
        };

        Ok(label)
    }
}

/// Computes the bucket label of `timestamp` for the given period.
///
/// Free-function form of [`Period::bucket`].
///
/// # Errors
///
/// Returns [`TsfoldError::InvalidTimestamp`] for unrepresentable timestamps.
pub fn bucket(timestamp: i64, period: Period) -> Result<String> {
    period.bucket(timestamp)
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = TsfoldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "year" | "yearly" => Ok(Self::Year),
            "q" | "quarter" | "quarterly" => Ok(Self::Quarter),
            "" | "m" | "month" | "monthly" => Ok(Self::Month),
            "w" | "week" | "weekly" => Ok(Self::Week),
            "d" | "day" | "daily" => Ok(Self::Day),
            _ => Err(TsfoldError::UnknownPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = TsfoldError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.as_str().to_string()
    }
}
