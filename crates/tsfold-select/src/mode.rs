//! Output routing of selected records.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use tsfold_types::TsfoldError;

use crate::FilterKind;

/// How selected records are routed to output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum OutputMode {
    /// Every candidate to the shared duplicates stream and to its filter's own stream.
    Split,
    /// Candidates with a unique date to one combined stream.
    Combine,
    /// Candidates flattened to one value series in the adjusted close.
    Regress,
    /// Split, combine and regress together.
    #[default]
    All,
}

impl OutputMode {
    /// Returns true if the combined stream is produced.
    #[must_use]
    pub const fn combines(&self) -> bool {
        matches!(self, Self::Combine | Self::All)
    }

    /// Returns true if the duplicates and per-filter streams are produced.
    #[must_use]
    pub const fn splits(&self) -> bool {
        matches!(self, Self::Split | Self::All)
    }

    /// Returns true if the regressed stream is produced.
    #[must_use]
    pub const fn regresses(&self) -> bool {
        matches!(self, Self::Regress | Self::All)
    }

    /// Returns the mode as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Combine => "combine",
            Self::Regress => "regress",
            Self::All => "all",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = TsfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "split" => Ok(Self::Split),
            "c" | "combine" => Ok(Self::Combine),
            "r" | "regress" => Ok(Self::Regress),
            "a" | "all" => Ok(Self::All),
            _ => Err(TsfoldError::UnknownOutputMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputMode {
    type Error = TsfoldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputMode> for String {
    fn from(value: OutputMode) -> Self {
        value.as_str().to_string()
    }
}

/// Logical output stream of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stream {
    /// Unique-by-date candidates of every filter.
    Combined,
    /// Every candidate of every filter, duplicates included.
    Duplicates,
    /// Candidates of one filter kind.
    Filter(FilterKind),
    /// Regressed value series.
    Regressed,
    /// Every raw input record (debug).
    AllRecords,
}

impl Stream {
    /// Stream private to one filter kind.
    #[must_use]
    pub const fn filter(kind: FilterKind) -> Self {
        Self::Filter(kind)
    }

    /// The filter kind of a private stream.
    #[must_use]
    pub const fn filter_kind(&self) -> Option<FilterKind> {
        match self {
            Self::Filter(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Name suffix of the stream's sink.
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Combined => "com",
            Self::Duplicates => "dup",
            Self::Regressed => "reg",
            Self::AllRecords => "all",
            Self::Filter(kind) => kind.name(),
        }
    }

    /// Streams the given configuration can produce, in output order.
    #[must_use]
    pub fn for_config(mode: OutputMode, filters: &[FilterKind], emit_all_records: bool) -> Vec<Self> {
        let mut streams = Vec::new();
        if mode.combines() {
            streams.push(Self::Combined);
        }
        if mode.splits() {
            streams.push(Self::Duplicates);
            for kind in filters {
                let stream = Self::filter(*kind);
                if !streams.contains(&stream) {
                    streams.push(stream);
                }
            }
        }
        if mode.regresses() {
            streams.push(Self::Regressed);
        }
        if emit_all_records {
            streams.push(Self::AllRecords);
        }
        streams
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}
