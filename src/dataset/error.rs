//! Dataset loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the source tables
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File could not be opened or read
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row could not be parsed
    #[error("CSV error in {table}: {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    /// Header row lacks a required column
    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
