//! Format errors.

use thiserror::Error;

/// Result type alias for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors that can occur while reading or rendering lines.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown column tag in a template.
    #[error("Unknown column tag: {0}")]
    UnknownColumn(String),

    /// Template without any column.
    #[error("Column template is empty")]
    EmptyTemplate,

    /// Input template lacks a required column.
    #[error("Input template needs a '{0}' column")]
    MissingColumn(&'static str),

    /// No input template fits the number of columns.
    #[error("Cannot infer input columns from {0} fields")]
    UnknownLayout(usize),

    /// Field that does not parse as its column type.
    #[error("Invalid {column} value: '{value}'")]
    InvalidField {
        /// Column tag.
        column: &'static str,
        /// Raw field text.
        value: String,
    },

    /// Line with a different column count than the first good line.
    #[error("Expected {expected} fields, found {found}")]
    ColumnCount {
        /// Fields on the first good line.
        expected: usize,
        /// Fields on this line.
        found: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
