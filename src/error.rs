//! Custom error types for the scale-tune application.
//!
//! This module defines domain-specific error types using thiserror,
//! providing clear error messages and proper error context propagation.

use thiserror::Error;

/// Errors raised while ingesting persisted load-cell readings
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read readings file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Malformed record at line {line}: {content:?} ({reason})")]
    ParseError {
        line: usize,
        content: String,
        reason: String,
    },
}

/// Errors raised by a single Kalman filter run
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Degenerate filter parameters: covariance + measurement variance is zero")]
    DegenerateParameters,
}

/// Errors raised by the parameter grid search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No measurements to evaluate; mean squared error is undefined")]
    InsufficientData,

    #[error("Empty candidate range for {axis}")]
    EmptySearchSpace { axis: &'static str },

    #[error("Every grid point failed with degenerate parameters")]
    NoValidTrial,
}

/// Errors raised while computing or persisting a calibration factor
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Reference reading is zero; no calibration factor exists")]
    DivisionByZero,

    #[error("Calibration file does not contain a valid number: {content:?}")]
    InvalidCalibrationFile { content: String },

    #[error("Failed to access calibration file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors related to application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Application-level errors that can wrap other error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
