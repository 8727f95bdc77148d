//! Record filter catalogue.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use tsfold_types::{Record, TsfoldError};

/// Record field a filter compares or regresses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Record timestamp.
    Timestamp,
    /// Opening price.
    Open,
    /// High price.
    High,
    /// Low price.
    Low,
    /// Closing price.
    Close,
    /// Adjusted close.
    AdjClose,
    /// Volume.
    Volume,
}

impl Field {
    /// Compares the field of two records.
    ///
    /// Returns `None` when a price is NaN.
    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record) -> Option<Ordering> {
        match self {
            Self::Timestamp => Some(a.timestamp.cmp(&b.timestamp)),
            Self::Volume => Some(a.volume.cmp(&b.volume)),
            Self::Open => a.open.partial_cmp(&b.open),
            Self::High => a.high.partial_cmp(&b.high),
            Self::Low => a.low.partial_cmp(&b.low),
            Self::Close => a.close.partial_cmp(&b.close),
            Self::AdjClose => a.adj_close.partial_cmp(&b.adj_close),
        }
    }

    /// Returns true if the field holds zero.
    #[must_use]
    pub fn is_zero(&self, record: &Record) -> bool {
        match self {
            Self::Timestamp => record.timestamp == 0,
            Self::Volume => record.volume == 0,
            Self::Open => record.open == 0.0,
            Self::High => record.high == 0.0,
            Self::Low => record.low == 0.0,
            Self::Close => record.close == 0.0,
            Self::AdjClose => record.adj_close == 0.0,
        }
    }

    /// Returns the price held by the field, if it is a price field.
    #[must_use]
    pub const fn price(&self, record: &Record) -> Option<f64> {
        match self {
            Self::Open => Some(record.open),
            Self::High => Some(record.high),
            Self::Low => Some(record.low),
            Self::Close => Some(record.close),
            Self::AdjClose => Some(record.adj_close),
            Self::Timestamp | Self::Volume => None,
        }
    }
}

/// When an incoming record replaces the current candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceRule {
    /// Incoming field strictly smaller (used with the timestamp).
    Earliest,
    /// Incoming field strictly greater (used with the timestamp).
    Latest,
    /// Incoming field strictly greater.
    Highest,
    /// Incoming field strictly smaller.
    Lowest,
    /// Smallest non-zero value; any non-zero value beats a zero candidate.
    LowestNonZero,
}

impl ReplaceRule {
    /// Returns true if `incoming` should replace `candidate`.
    #[must_use]
    pub fn replaces(&self, field: Field, candidate: &Record, incoming: &Record) -> bool {
        let ordering = field.compare(incoming, candidate);
        match self {
            Self::Earliest | Self::Lowest => ordering == Some(Ordering::Less),
            Self::Latest | Self::Highest => ordering == Some(Ordering::Greater),
            Self::LowestNonZero => {
                if field.is_zero(candidate) {
                    ordering == Some(Ordering::Greater)
                } else {
                    !field.is_zero(incoming) && ordering == Some(Ordering::Less)
                }
            }
        }
    }
}

/// Kinds of record filters.
///
/// Discriminants index [`CATALOGUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    /// Record with the earliest timestamp (the period open).
    EarliestOpen,
    /// Record with the earliest timestamp, regressed to its close.
    EarliestClose,
    /// Record with the earliest timestamp, keeping the adjusted close.
    EarliestAdjClose,
    /// Record with the latest timestamp (the period close).
    LatestClose,
    /// Record with the latest timestamp, keeping the adjusted close.
    LatestAdjClose,
    /// Highest opening price.
    HighestOpen,
    /// Lowest opening price.
    LowestOpen,
    /// Highest high.
    HighestHigh,
    /// Lowest high.
    LowestHigh,
    /// Lowest low.
    LowestLow,
    /// Highest low.
    HighestLow,
    /// Highest close.
    HighestClose,
    /// Lowest close.
    LowestClose,
    /// Highest adjusted close.
    HighestAdjClose,
    /// Lowest adjusted close.
    LowestAdjClose,
    /// Highest volume.
    HighestVolume,
    /// Lowest non-zero volume.
    LowestVolume,
}

/// One row of the filter catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    /// Filter kind.
    pub kind: FilterKind,
    /// Canonical name, also used for the filter's private output stream.
    pub name: &'static str,
    /// Short command line code, if any.
    pub code: Option<&'static str>,
    /// Field compared by the replace rule.
    pub field: Field,
    /// Replace rule.
    pub rule: ReplaceRule,
    /// Field copied into the adjusted close when regressing, if any.
    pub regress: Option<Field>,
    /// One line description.
    pub description: &'static str,
}

const fn def(
    kind: FilterKind,
    name: &'static str,
    code: Option<&'static str>,
    field: Field,
    rule: ReplaceRule,
    regress: Option<Field>,
    description: &'static str,
) -> FilterDef {
    FilterDef {
        kind,
        name,
        code,
        field,
        rule,
        regress,
        description,
    }
}

use Field::{AdjClose, Close, High, Low, Open, Timestamp, Volume};
use ReplaceRule::{Earliest, Highest, Latest, Lowest, LowestNonZero};

/// The filter catalogue, in [`FilterKind`] declaration order.
pub static CATALOGUE: [FilterDef; 17] = [
    def(FilterKind::EarliestOpen, "earliest-open", Some("o"), Timestamp, Earliest, Some(Open), "Opening value for the period"),
    def(FilterKind::EarliestClose, "earliest-close", None, Timestamp, Earliest, Some(Close), "Close of the first record in the period"),
    def(FilterKind::EarliestAdjClose, "earliest-adjclose", None, Timestamp, Earliest, None, "Adjusted close of the first record in the period"),
    def(FilterKind::LatestClose, "latest-close", Some("c"), Timestamp, Latest, Some(Close), "Closing value for the period"),
    def(FilterKind::LatestAdjClose, "latest-adjclose", Some("a"), Timestamp, Latest, None, "Adjusted close value for the period"),
    def(FilterKind::HighestOpen, "highest-open", Some("ho"), Open, Highest, Some(Open), "Highest open in the period"),
    def(FilterKind::LowestOpen, "lowest-open", Some("lo"), Open, Lowest, Some(Open), "Lowest open in the period"),
    def(FilterKind::HighestHigh, "highest-high", Some("h"), High, Highest, Some(High), "Highest high in the period"),
    def(FilterKind::LowestHigh, "lowest-high", Some("lh"), High, Lowest, Some(High), "Lowest high in the period"),
    def(FilterKind::LowestLow, "lowest-low", Some("l"), Low, Lowest, Some(Low), "Lowest low in the period"),
    def(FilterKind::HighestLow, "highest-low", Some("hl"), Low, Highest, Some(Low), "Highest low in the period"),
    def(FilterKind::HighestClose, "highest-close", Some("hc"), Close, Highest, Some(Close), "Highest close in the period"),
    def(FilterKind::LowestClose, "lowest-close", Some("lc"), Close, Lowest, Some(Close), "Lowest close in the period"),
    def(FilterKind::HighestAdjClose, "highest-adjclose", Some("ha"), AdjClose, Highest, None, "Highest adjusted close in the period"),
    def(FilterKind::LowestAdjClose, "lowest-adjclose", Some("la"), AdjClose, Lowest, None, "Lowest adjusted close in the period"),
    def(FilterKind::HighestVolume, "highest-volume", Some("hv"), Volume, Highest, None, "Highest volume in the period"),
    def(FilterKind::LowestVolume, "lowest-volume", Some("lv"), Volume, LowestNonZero, None, "Lowest non-zero volume in the period"),
];

impl FilterKind {
    /// Returns the catalogue row of this kind.
    #[must_use]
    pub fn definition(&self) -> &'static FilterDef {
        &CATALOGUE[*self as usize]
    }

    /// Canonical filter name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.definition().name
    }

    /// Returns true if `incoming` should replace the `candidate` record.
    #[must_use]
    pub fn replaces(&self, candidate: &Record, incoming: &Record) -> bool {
        let def = self.definition();
        def.rule.replaces(def.field, candidate, incoming)
    }

    /// Returns all filter kinds in catalogue order.
    pub fn all() -> impl Iterator<Item = Self> {
        CATALOGUE.iter().map(|def| def.kind)
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = TsfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        CATALOGUE
            .iter()
            .find(|def| def.name == needle || def.code == Some(needle.as_str()))
            .map(|def| def.kind)
            .ok_or_else(|| TsfoldError::UnknownFilter(s.to_string()))
    }
}

/// Default filter list used when selection is requested without one.
pub(crate) const DEFAULT_FILTERS: &str = "o,ho,lo,h,lh,l,hl,hv,lv,a,ha,la";

/// Ordered, non-empty list of filters.
///
/// The position of a filter in the list is its filter id. The same kind may
/// appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilterList(Vec<FilterKind>);

impl FilterList {
    /// Creates a filter list.
    ///
    /// # Errors
    ///
    /// Returns [`TsfoldError::EmptyFilterList`] if `filters` is empty.
    pub fn new(filters: Vec<FilterKind>) -> Result<Self, TsfoldError> {
        if filters.is_empty() {
            return Err(TsfoldError::EmptyFilterList);
        }
        Ok(Self(filters))
    }

    /// Iterates the filters with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (usize, FilterKind)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// Filters in configured order.
    #[must_use]
    pub fn kinds(&self) -> &[FilterKind] {
        &self.0
    }

    /// Number of configured filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no filter is configured.
    ///
    /// Lists built with [`FilterList::new`] or by parsing always hold at
    /// least one filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FilterList {
    fn default() -> Self {
        Self(
            DEFAULT_FILTERS
                .split(',')
                .filter_map(|code| code.parse().ok())
                .collect(),
        )
    }
}

impl FromStr for FilterList {
    type Err = TsfoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filters = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<FilterKind>, _>>()?;
        Self::new(filters)
    }
}

impl std::fmt::Display for FilterList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(FilterKind::name).collect();
        write!(f, "{}", names.join(","))
    }
}

impl TryFrom<String> for FilterList {
    type Error = TsfoldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterList> for String {
    fn from(list: FilterList) -> Self {
        list.to_string()
    }
}
