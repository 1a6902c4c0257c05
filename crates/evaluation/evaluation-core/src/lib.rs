//! Evaluation Core
//!
//! **WARNING: This is an internal crate. Do not depend on it directly.**
//! **Use `evaluation-facade` instead for a stable public API.**
//!
//! Forecast accuracy metrics and the quantile evaluator.

pub mod metrics;
pub mod quantile_evaluator;

// Re-export SPI and API types
pub use evaluation_api::*;

pub use quantile_evaluator::QuantileEvaluator;
