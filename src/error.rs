//! Error types for RAB Estimator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a project file or reference catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the project file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The project file is structurally invalid.
    #[error("invalid project file: {message}")]
    InvalidFormat { message: String },

    /// Failed to deserialize the project file JSON.
    #[error("JSON deserialization failed: {source}")]
    JsonParse {
        #[from]
        source: serde_json::Error,
    },
}

/// Errors that can occur when exporting data.
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
