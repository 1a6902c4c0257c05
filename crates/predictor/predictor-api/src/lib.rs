//! Forecasting estimators
//!
//! This crate provides baseline estimators that plug into the tuning loop:
//!
//! - [`smoothing`]: Seasonal moving average

pub mod smoothing;

// Re-export from core
pub use predictor_core::{utils, Result, SpiResult, TsError};

// Re-export traits from SPI
pub use predictor_spi::{Estimator, Predictor, TrainingContext};

// Re-export implementations for convenience
pub use smoothing::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Estimator, Predictor, TrainingContext};
    // Smoothing
    pub use crate::smoothing::{SeasonalMovingAverage, SeasonalMovingAveragePredictor};
    // Error types
    pub use crate::{Result, TsError};
}
