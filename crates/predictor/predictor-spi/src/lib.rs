//! Predictor Service Provider Interface
//!
//! Defines the capabilities a forecasting model exposes to the tuning loop:
//! an [`Estimator`] trains on a dataset and yields a [`Predictor`], which
//! produces probabilistic forecasts for prediction inputs.

use std::error::Error;

use dataset_spi::{DatasetEntry, Frequency};
use evaluation_spi::Forecast;
use serde::{Deserialize, Serialize};

/// Result type for predictor operations
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Settings fixed for every model configuration trained in a tuning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingContext {
    /// Number of steps each forecast covers
    pub prediction_length: usize,
    /// Sampling frequency of the training data
    pub freq: Frequency,
    /// Per-trial training budget
    pub epochs: usize,
    /// Suppress model progress output
    pub quiet: bool,
}

impl TrainingContext {
    /// Create a context with one epoch and progress output suppressed.
    pub fn new(prediction_length: usize, freq: Frequency) -> Self {
        Self {
            prediction_length,
            freq,
            epochs: 1,
            quiet: true,
        }
    }

    /// Set the epoch budget.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Enable or suppress progress output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// A model configuration that can be trained.
pub trait Estimator: Send + Sync {
    /// Train against `training` and return a predictor.
    fn train(&self, training: &[DatasetEntry]) -> Result<Box<dyn Predictor>>;
}

/// A trained model.
pub trait Predictor: Send + Sync {
    /// Number of steps each forecast covers.
    fn prediction_length(&self) -> usize;

    /// Forecast the steps following each input, one forecast per input in
    /// input order.
    fn predict(&self, inputs: &[DatasetEntry]) -> Result<Vec<Box<dyn Forecast>>>;
}
