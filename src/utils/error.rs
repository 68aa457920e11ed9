//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while parsing a profiler report
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid report format: {0}")]
    InvalidFormat(String),

    #[error("Unknown duration unit in '{0}' (expected s, ms or us)")]
    UnknownDurationUnit(String),

    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("Invalid value in column '{column}' at line {line}: {reason}")]
    InvalidValue {
        column: String,
        line: usize,
        reason: String,
    },

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid table document: {0}")]
    InvalidDocument(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
