//! Evaluation Consumer API
//!
//! Configuration for quantile-based forecast evaluation.

pub mod config;

pub use config::*;

// Re-export SPI types
pub use evaluation_spi::{
    check_quantile, metric_names, quantile_metric, AggregateMetrics, EvaluationError, Evaluator,
    Forecast, GaussianForecast, ItemMetrics, Result, SampleForecast,
};
