//! Error types for the forecast_dash crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the forecast_dash crate
#[derive(Debug, Error)]
pub enum ForecastDashError {
    /// Stationarity-test preconditions unmet
    #[error("Statistical test error: {0}")]
    StatisticalTestError(String),

    /// Model estimation failure
    #[error("Model fit error: {0}")]
    ModelFitError(String),

    /// Unrecognized upload type
    #[error("Unsupported format: {0}")]
    UnsupportedFormatError(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastDashError>;

impl From<PolarsError> for ForecastDashError {
    fn from(err: PolarsError) -> Self {
        ForecastDashError::PolarsError(err.to_string())
    }
}
