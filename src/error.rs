//! Error types for bim-diff.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading snapshot or summary files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the input file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The snapshot JSON is invalid or malformed.
    #[error("invalid snapshot format: {source}")]
    InvalidSnapshot {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to read CSV data.
    #[error("CSV read failed: {source}")]
    CsvRead {
        #[from]
        source: csv::Error,
    },

    /// A summary CSV column is missing or unparsable.
    #[error("invalid summary column '{column}': {message}")]
    InvalidColumn { column: String, message: String },
}

/// Errors that can occur when exporting results.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
