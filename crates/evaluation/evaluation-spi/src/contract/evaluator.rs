//! Evaluator contract.

use dataset_spi::IndexedSeries;

use super::Forecast;
use crate::error::Result;
use crate::model::{AggregateMetrics, ItemMetrics};

/// Scores forecasts against materialized labels.
pub trait Evaluator: Send + Sync {
    /// Quantile levels the evaluator scores.
    fn quantiles(&self) -> &[f64];

    /// Evaluate `forecasts[i]` against `labels[i]`.
    ///
    /// When `num_series` is given it must equal the number of pairs.
    fn evaluate(
        &self,
        labels: &[IndexedSeries],
        forecasts: &[Box<dyn Forecast>],
        num_series: Option<usize>,
    ) -> Result<(AggregateMetrics, Vec<ItemMetrics>)>;
}
