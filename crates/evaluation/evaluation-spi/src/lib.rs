//! Evaluation Service Provider Interface
//!
//! Defines the probabilistic forecast abstraction, the named metric
//! containers and the contract for scoring forecasts against labels.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Evaluator, Forecast};
pub use error::{EvaluationError, Result};
pub use model::{
    check_quantile, metric_names, quantile_metric, AggregateMetrics, GaussianForecast,
    ItemMetrics, SampleForecast,
};
