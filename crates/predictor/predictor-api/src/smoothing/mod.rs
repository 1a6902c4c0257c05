//! Smoothing-based estimators

mod moving_average;

pub use moving_average::{SeasonalMovingAverage, SeasonalMovingAveragePredictor};
