//! Engine errors.

use std::path::PathBuf;

use thiserror::Error;
use tsfold_format::FormatError;
use tsfold_types::TsfoldError;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while running a job.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid job configuration or key derivation failure.
    #[error(transparent)]
    Config(#[from] TsfoldError),

    /// Template or ingestion error.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Failed to create the output directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize run statistics.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
