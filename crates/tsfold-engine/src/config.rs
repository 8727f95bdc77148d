//! Job configuration.

use serde::{Deserialize, Serialize};
use tsfold_format::ColumnTemplate;
use tsfold_select::{FilterList, OutputMode, SelectorConfig};
use tsfold_types::{Period, SortDirection, TsfoldError};

use crate::Result;

/// Configuration of one consolidation or selection run.
///
/// Fixed for the lifetime of a run. A job with a filter list selects
/// records; a job without one consolidates periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Input column template; inferred per line when absent.
    pub csvcols: Option<String>,
    /// Output column template.
    pub outcols: String,
    /// Consolidation period.
    pub period: Period,
    /// Record order within groups and in the output.
    pub direction: SortDirection,
    /// Filters of a selection job.
    pub filters: Option<FilterList>,
    /// Output routing of a selection job.
    pub mode: OutputMode,
    /// Write a header row at the top of every sink.
    pub header: bool,
    /// Re-emit every raw record to the debug sink.
    pub emit_all_records: bool,
    /// Number of shards reduced in parallel.
    pub shards: usize,
    /// Prefix of output file names.
    pub base_name: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            csvcols: None,
            outcols: ColumnTemplate::default().to_string(),
            period: Period::default(),
            direction: SortDirection::default(),
            filters: None,
            mode: OutputMode::default(),
            header: true,
            emit_all_records: false,
            shards: 1,
            base_name: "out".to_string(),
        }
    }
}

/// What a job does with each group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// One summary per group.
    Consolidate,
    /// Extremal records per group.
    Select(SelectorConfig),
}

impl JobConfig {
    /// Creates a consolidation job for `period`.
    #[must_use]
    pub fn consolidate(period: Period) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Creates a selection job for `period` with `filters`.
    #[must_use]
    pub fn select(period: Period, filters: FilterList) -> Self {
        Self {
            period,
            filters: Some(filters),
            ..Self::default()
        }
    }

    /// Checks every value before any record is read.
    ///
    /// # Errors
    ///
    /// Returns an error if a template does not parse, `shards` is zero or
    /// `base_name` is empty.
    pub fn validate(&self) -> Result<()> {
        self.input_template()?;
        self.output_template()?;
        if self.shards == 0 {
            return Err(TsfoldError::InvalidConfig("shards must be at least 1".to_string()).into());
        }
        if self.base_name.trim().is_empty() {
            return Err(TsfoldError::InvalidConfig("base name is empty".to_string()).into());
        }
        Ok(())
    }

    /// Parsed input template, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn input_template(&self) -> Result<Option<ColumnTemplate>> {
        Ok(self.csvcols.as_deref().map(str::parse::<ColumnTemplate>).transpose()?)
    }

    /// Parsed output template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn output_template(&self) -> Result<ColumnTemplate> {
        Ok(self.outcols.parse::<ColumnTemplate>()?)
    }

    /// The job kind this configuration describes.
    #[must_use]
    pub fn kind(&self) -> JobKind {
        match &self.filters {
            None => JobKind::Consolidate,
            Some(filters) => JobKind::Select(SelectorConfig {
                filters: filters.clone(),
                direction: self.direction,
                mode: self.mode,
                emit_all_records: self.emit_all_records,
            }),
        }
    }
}
