//! Forecast implementations and metric containers.

mod gaussian;
mod metrics;
mod quantile;
mod sample;

pub use gaussian::GaussianForecast;
pub use metrics::{metric_names, quantile_metric, AggregateMetrics, ItemMetrics};
pub use quantile::check_quantile;
pub use sample::SampleForecast;
