//! Probabilistic forecast contract.

use std::fmt;

use chrono::NaiveDateTime;
use dataset_spi::Frequency;

use crate::error::Result;

/// A probabilistic forecast over a fixed horizon.
///
/// Step `i` of the forecast refers to `start + i * freq`.
pub trait Forecast: fmt::Debug + Send + Sync {
    /// Timestamp of the first forecast step.
    fn start(&self) -> NaiveDateTime;

    /// Sampling frequency of the forecast.
    fn freq(&self) -> Frequency;

    /// Number of forecast steps.
    fn prediction_length(&self) -> usize;

    /// Identifier of the forecast series, if any.
    fn item_id(&self) -> Option<&str>;

    /// Per-step mean.
    fn mean(&self) -> Vec<f64>;

    /// Per-step quantile at level `q` in `[0, 1]`.
    fn quantile(&self, q: f64) -> Result<Vec<f64>>;

    /// Per-step median.
    fn median(&self) -> Result<Vec<f64>> {
        self.quantile(0.5)
    }

    /// Timestamps of the forecast steps.
    fn index(&self) -> Result<Vec<NaiveDateTime>> {
        let freq = self.freq();
        let start = self.start();
        (0..self.prediction_length())
            .map(|step| freq.advance(start, step).map_err(Into::into))
            .collect()
    }
}
