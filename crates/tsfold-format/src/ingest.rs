//! CSV ingestion of dated OHLCV lines.

use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tsfold_types::{Columns, Record};

use crate::{Column, ColumnTemplate, FormatError, Result};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"];

/// Line counters of one ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Lines read.
    pub lines: u64,
    /// Header lines skipped.
    pub headers: u64,
    /// Lines turned into records.
    pub good: u64,
    /// Malformed lines skipped.
    pub bad: u64,
}

impl IngestStats {
    /// Adds another set of counters to this one.
    pub const fn merge(&mut self, other: &Self) {
        self.lines += other.lines;
        self.headers += other.headers;
        self.good += other.good;
        self.bad += other.bad;
    }
}

/// A parsed record with its exchange and symbol tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// Exchange tag, possibly empty.
    pub exchange: String,
    /// Symbol tag, possibly empty.
    pub symbol: String,
    /// The record.
    pub record: Record,
}

/// Turns CSV lines into records.
///
/// Without an explicit template each line's columns are inferred from its
/// field count. Every line must have as many fields as the first good line.
/// Malformed lines are counted and skipped, never fatal.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    template: Option<ColumnTemplate>,
    exchange: String,
    symbol: String,
    expected: Option<usize>,
    stats: IngestStats,
}

impl Ingestor {
    /// Creates an ingestor.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingColumn`] if `template` has neither a
    /// date nor a timestamp column.
    pub fn new(template: Option<ColumnTemplate>) -> Result<Self> {
        if let Some(template) = &template {
            if !template.contains(Column::Date) && !template.contains(Column::Timestamp) {
                return Err(FormatError::MissingColumn("d"));
            }
        }
        Ok(Self {
            template,
            ..Self::default()
        })
    }

    /// Sets the exchange used when lines carry none.
    #[must_use]
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// Sets the symbol used when lines carry none.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Price columns the configured template carries, if any.
    #[must_use]
    pub fn columns(&self) -> Option<Columns> {
        self.template.as_ref().map(ColumnTemplate::price_columns)
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Reads every line of `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying reader fails.
    pub fn read<R: Read>(&mut self, reader: R) -> Result<Vec<ParsedRecord>> {
        let mut csv = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv.records() {
            match result {
                Ok(fields) => records.extend(self.ingest(&fields)),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    self.stats.lines += 1;
                    self.stats.bad += 1;
                    warn!("skipping unreadable line: {e}");
                }
            }
        }
        debug!(
            "ingested {} lines: {} good, {} bad, {} headers",
            self.stats.lines, self.stats.good, self.stats.bad, self.stats.headers
        );
        Ok(records)
    }

    /// Ingests one line's fields.
    ///
    /// Returns `None` for header and malformed lines.
    pub fn ingest(&mut self, fields: &StringRecord) -> Option<ParsedRecord> {
        self.stats.lines += 1;
        if is_header(fields) {
            self.stats.headers += 1;
            return None;
        }
        match self.parse(fields) {
            Ok(parsed) => {
                self.expected.get_or_insert(fields.len());
                self.stats.good += 1;
                Some(parsed)
            }
            Err(e) => {
                self.stats.bad += 1;
                warn!("skipping line {}: {e}", self.stats.lines);
                None
            }
        }
    }

    fn parse(&self, fields: &StringRecord) -> Result<ParsedRecord> {
        if let Some(expected) = self.expected {
            if fields.len() != expected {
                return Err(FormatError::ColumnCount {
                    expected,
                    found: fields.len(),
                });
            }
        }
        let inferred;
        let template = match &self.template {
            Some(template) => template,
            None => {
                inferred = ColumnTemplate::infer(fields.len())
                    .ok_or(FormatError::UnknownLayout(fields.len()))?;
                &inferred
            }
        };
        if fields.len() != template.len() {
            return Err(FormatError::ColumnCount {
                expected: template.len(),
                found: fields.len(),
            });
        }

        let mut parsed = ParsedRecord {
            exchange: self.exchange.clone(),
            symbol: self.symbol.clone(),
            record: Record::adj_only(0, 0, 0.0).with_columns(template.price_columns()),
        };
        let mut dated = false;
        for (column, value) in template.columns().iter().zip(fields.iter()) {
            let rec = &mut parsed.record;
            match column {
                Column::Exchange => parsed.exchange = value.to_string(),
                Column::Symbol => parsed.symbol = value.to_string(),
                Column::Date => {
                    rec.timestamp = parse_date(value)?;
                    dated = true;
                }
                Column::Timestamp => {
                    rec.timestamp = value.parse().map_err(|_| invalid(*column, value))?;
                    dated = true;
                }
                Column::Open => rec.open = parse_price(*column, value)?,
                Column::High => rec.high = parse_price(*column, value)?,
                Column::Low => rec.low = parse_price(*column, value)?,
                Column::Close => rec.close = parse_price(*column, value)?,
                Column::AdjClose => rec.adj_close = parse_price(*column, value)?,
                Column::Volume => rec.volume = parse_volume(value)?,
                Column::Label
                | Column::Index
                | Column::GroupKey
                | Column::HeaderKey
                | Column::PeriodKey => {}
            }
        }
        if !dated {
            return Err(FormatError::MissingColumn("d"));
        }
        Ok(parsed)
    }
}

fn is_header(fields: &StringRecord) -> bool {
    fields.iter().any(|field| {
        let field = field.to_lowercase();
        field.contains("date") || field.contains("timestamp")
    })
}

fn invalid(column: Column, value: &str) -> FormatError {
    FormatError::InvalidField {
        column: column.tag(),
        value: value.to_string(),
    }
}

fn parse_date(value: &str) -> Result<i64> {
    let datetime = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| invalid(Column::Date, value))?;
    Ok(datetime.and_utc().timestamp_millis())
}

fn parse_price(column: Column, value: &str) -> Result<f64> {
    if value.is_empty() {
        return Ok(0.0);
    }
    value.parse().map_err(|_| invalid(column, value))
}

fn parse_volume(value: &str) -> Result<u64> {
    if value.is_empty() {
        return Ok(0);
    }
    if let Ok(volume) = value.parse::<u64>() {
        return Ok(volume);
    }
    match value.parse::<f64>() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(volume) if volume.is_finite() && volume >= 0.0 => Ok(volume as u64),
        _ => Err(invalid(Column::Volume, value)),
    }
}
