//! Evaluation error types

use dataset_spi::DatasetError;
use thiserror::Error;

/// Errors that can occur while building forecasts or scoring them
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Nothing to evaluate
    #[error("No series to evaluate")]
    EmptyInput,

    /// Labels, forecasts and the declared series count disagree
    #[error("Series count mismatch: expected {expected}, got {actual}")]
    SeriesCountMismatch { expected: usize, actual: usize },

    /// Forecast does not line up with its label by timestamp
    #[error("Forecast for '{item_id}' is misaligned with its label: {reason}")]
    Misaligned { item_id: String, reason: String },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Quantile level outside `[0, 1]`
    #[error("Invalid quantile level {0}: must lie in [0, 1]")]
    InvalidQuantile(f64),

    /// Forecast parameters are inconsistent
    #[error("Invalid forecast: {0}")]
    InvalidForecast(String),

    /// Timestamp arithmetic on the forecast index failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
