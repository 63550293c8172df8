//! Error handling for wildfire processing and analysis.
//!
//! Data-quality problems are never errors: they are collected in the
//! validation report. The variants here cover missing inputs, programming
//! order mistakes (asking for an analysis before its columns exist) and
//! failures of the underlying I/O, CSV and serialization layers.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file could not be parsed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Data file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Column '{column}' not found (required by {operation})")]
    MissingColumn {
        column: String,
        operation: &'static str,
    },

    #[error("Column '{column}' has unsupported type {dtype} for {operation}")]
    UnsupportedColumnType {
        column: String,
        dtype: String,
        operation: &'static str,
    },

    #[error("Dataset is empty: {operation} needs at least one row")]
    EmptyDataset { operation: &'static str },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to write {path}: {reason}")]
    OutputFailed { path: PathBuf, reason: String },
}

impl FireError {
    /// Create a missing column error for the named operation
    pub fn missing_column(column: impl Into<String>, operation: &'static str) -> Self {
        Self::MissingColumn {
            column: column.into(),
            operation,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FireError>;
