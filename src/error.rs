//! Error types for the brent_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the brent_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The model artifact file does not exist at the expected path
    #[error("Model artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The model artifact is malformed or incompatible with the expected schema
    #[error("Failed to deserialize model artifact: {0}")]
    Deserialization(String),

    /// The requested forecast horizon is not a positive integer
    #[error("Invalid forecast horizon: {0}")]
    InvalidHorizon(String),

    /// The model's predict step failed for this request
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Error related to historical data validation or processing
    #[error("Data error: {0}")]
    Data(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::Polars(err.to_string())
    }
}
