//! Evaluator configuration.

use evaluation_spi::{check_quantile, EvaluationError, Result};
use serde::{Deserialize, Serialize};

/// Quantile levels scored by default.
pub const DEFAULT_QUANTILES: [f64; 3] = [0.1, 0.5, 0.9];

/// Configuration for a quantile evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Quantile levels to score, each in `[0, 1]`
    pub quantiles: Vec<f64>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            quantiles: DEFAULT_QUANTILES.to_vec(),
        }
    }
}

impl EvaluatorConfig {
    /// Set the quantile levels.
    pub fn quantiles(mut self, quantiles: &[f64]) -> Self {
        self.quantiles = quantiles.to_vec();
        self
    }

    /// Check there is at least one level and every level lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.quantiles.is_empty() {
            return Err(EvaluationError::InvalidParameter {
                name: "quantiles".to_string(),
                reason: "at least one quantile level is required".to_string(),
            });
        }
        for &q in &self.quantiles {
            check_quantile(q)?;
        }
        Ok(())
    }
}
