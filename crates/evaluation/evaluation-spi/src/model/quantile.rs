use crate::error::{EvaluationError, Result};

/// Check that `q` is a quantile level in `[0, 1]`.
pub fn check_quantile(q: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&q) {
        Ok(q)
    } else {
        Err(EvaluationError::InvalidQuantile(q))
    }
}
