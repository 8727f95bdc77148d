//! Column tags.

use std::str::FromStr;

use crate::FormatError;

/// One column of a line template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Filter name or output label (`id`).
    Label,
    /// Filter id or summary ordinal (`in`).
    Index,
    /// Exchange (`x`).
    Exchange,
    /// Symbol (`s`).
    Symbol,
    /// Calendar date, `YYYY-MM-DD` in UTC (`d`).
    Date,
    /// Millisecond epoch timestamp (`t`).
    Timestamp,
    /// Opening price (`o`).
    Open,
    /// High price (`h`).
    High,
    /// Low price (`l`).
    Low,
    /// Closing price (`c`).
    Close,
    /// Volume (`v`).
    Volume,
    /// Adjusted close (`a`).
    AdjClose,
    /// Rendered group identity (`k`).
    GroupKey,
    /// Exchange and symbol (`r`).
    HeaderKey,
    /// Period bucket (`p`).
    PeriodKey,
}

impl Column {
    /// Returns the template tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Label => "id",
            Self::Index => "in",
            Self::Exchange => "x",
            Self::Symbol => "s",
            Self::Date => "d",
            Self::Timestamp => "t",
            Self::Open => "o",
            Self::High => "h",
            Self::Low => "l",
            Self::Close => "c",
            Self::Volume => "v",
            Self::AdjClose => "a",
            Self::GroupKey => "k",
            Self::HeaderKey => "r",
            Self::PeriodKey => "p",
        }
    }

    /// Returns the header row name.
    #[must_use]
    pub const fn header_name(&self) -> &'static str {
        match self {
            Self::Label => "Id",
            Self::Index => "Id Num",
            Self::Exchange => "Exchange",
            Self::Symbol => "Stock_Symbol",
            Self::Date => "Date",
            Self::Timestamp => "Timestamp",
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::Volume => "Volume",
            Self::AdjClose => "Adj Close",
            Self::GroupKey => "Group Key",
            Self::HeaderKey => "Header Key",
            Self::PeriodKey => "Period Key",
        }
    }

    /// Returns all columns.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Label,
            Self::Index,
            Self::Exchange,
            Self::Symbol,
            Self::Date,
            Self::Timestamp,
            Self::Open,
            Self::High,
            Self::Low,
            Self::Close,
            Self::Volume,
            Self::AdjClose,
            Self::GroupKey,
            Self::HeaderKey,
            Self::PeriodKey,
        ]
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Column {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|column| column.tag() == tag)
            .ok_or_else(|| FormatError::UnknownColumn(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinct() {
        for column in Column::all() {
            assert_eq!(column.tag().parse::<Column>().unwrap(), *column);
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!("q".parse::<Column>(), Err(FormatError::UnknownColumn(tag)) if tag == "q"));
    }

    #[test]
    fn test_header_names() {
        assert_eq!(Column::AdjClose.header_name(), "Adj Close");
        assert_eq!(Column::Symbol.header_name(), "Stock_Symbol");
    }
}
