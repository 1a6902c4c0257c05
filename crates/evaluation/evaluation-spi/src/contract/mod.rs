//! Contracts implemented by forecasts and evaluators.

mod evaluator;
mod forecast;

pub use evaluator::Evaluator;
pub use forecast::Forecast;
