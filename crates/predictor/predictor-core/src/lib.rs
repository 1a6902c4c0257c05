//! Predictor Core
//!
//! Core types, error handling, and utilities for forecasting models.

pub use predictor_spi::{Estimator, Predictor, TrainingContext};
use thiserror::Error;

/// Re-export SPI Result type for trait implementations
pub use predictor_spi::Result as SpiResult;

/// Result type for predictor operations
pub type Result<T> = std::result::Result<T, TsError>;

/// Errors that can occur during time series operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TsError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid time series data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub mod utils {
    //! Utility functions for forecasting models

    pub mod spread {
        //! Forecast uncertainty from in-sample residuals

        /// Population standard deviation of the finite residuals, `None`
        /// when there are none.
        pub fn residual_std_dev(residuals: &[f64]) -> Option<f64> {
            let finite: Vec<f64> = residuals.iter().copied().filter(|r| r.is_finite()).collect();
            if finite.is_empty() {
                return None;
            }
            let n = finite.len() as f64;
            let mean = finite.iter().sum::<f64>() / n;
            let variance = finite.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
            Some(variance.sqrt())
        }

        /// Standard errors growing with the square root of the horizon step.
        pub fn horizon_std_errors(std_dev: f64, steps: usize) -> Vec<f64> {
            (0..steps).map(|h| std_dev * ((h + 1) as f64).sqrt()).collect()
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn test_residual_std_dev() {
                let std = residual_std_dev(&[1.0, -1.0, 1.0, -1.0]).unwrap();
                assert!((std - 1.0).abs() < 0.001);
            }

            #[test]
            fn test_residual_std_dev_skips_nan() {
                let std = residual_std_dev(&[2.0, f64::NAN, 2.0]).unwrap();
                assert!(std.abs() < 0.001);
                assert!(residual_std_dev(&[f64::NAN]).is_none());
                assert!(residual_std_dev(&[]).is_none());
            }

            #[test]
            fn test_horizon_std_errors() {
                let errors = horizon_std_errors(2.0, 4);
                assert_eq!(errors.len(), 4);
                assert!((errors[0] - 2.0).abs() < 0.001);
                assert!((errors[3] - 4.0).abs() < 0.001);
            }
        }
    }
}
