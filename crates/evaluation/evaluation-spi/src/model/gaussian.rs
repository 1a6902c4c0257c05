//! Parametric Gaussian forecasts.

use chrono::NaiveDateTime;
use dataset_spi::Frequency;
use statrs::distribution::{ContinuousCDF, Normal};

use super::check_quantile;
use crate::contract::Forecast;
use crate::error::{EvaluationError, Result};

/// Forecast with an independent normal distribution per step.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianForecast {
    mean: Vec<f64>,
    std_dev: Vec<f64>,
    start: NaiveDateTime,
    freq: Frequency,
    item_id: Option<String>,
}

impl GaussianForecast {
    /// Create a forecast from per-step means and standard deviations.
    pub fn new(
        mean: Vec<f64>,
        std_dev: Vec<f64>,
        start: NaiveDateTime,
        freq: Frequency,
    ) -> Result<Self> {
        if mean.len() != std_dev.len() {
            return Err(EvaluationError::InvalidForecast(format!(
                "{} means but {} standard deviations",
                mean.len(),
                std_dev.len()
            )));
        }
        if let Some(bad) = std_dev.iter().find(|s| s.is_nan() || **s < 0.0) {
            return Err(EvaluationError::InvalidForecast(format!(
                "standard deviation must be non-negative, got {bad}"
            )));
        }
        Ok(Self {
            mean,
            std_dev,
            start,
            freq,
            item_id: None,
        })
    }

    /// Set the series identifier.
    pub fn with_item_id(mut self, item_id: Option<String>) -> Self {
        self.item_id = item_id;
        self
    }

    /// Per-step standard deviation.
    pub fn std_dev(&self) -> &[f64] {
        &self.std_dev
    }
}

impl Forecast for GaussianForecast {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn freq(&self) -> Frequency {
        self.freq
    }

    fn prediction_length(&self) -> usize {
        self.mean.len()
    }

    fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    fn mean(&self) -> Vec<f64> {
        self.mean.clone()
    }

    fn quantile(&self, q: f64) -> Result<Vec<f64>> {
        let q = check_quantile(q)?;
        let standard = Normal::new(0.0, 1.0)
            .map_err(|e| EvaluationError::InvalidForecast(e.to_string()))?;
        let z = standard.inverse_cdf(q);

        Ok(self
            .mean
            .iter()
            .zip(&self.std_dev)
            .map(|(&mu, &sigma)| if sigma == 0.0 { mu } else { mu + sigma * z })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_spi::parse_timestamp;

    fn forecast(mean: Vec<f64>, std_dev: Vec<f64>) -> GaussianForecast {
        GaussianForecast::new(
            mean,
            std_dev,
            parse_timestamp("2021-01-01 00:00").unwrap(),
            Frequency::parse("1H").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_median_is_mean() {
        let f = forecast(vec![1.0, 2.0], vec![0.5, 1.0]);
        let median = f.median().unwrap();
        assert!((median[0] - 1.0).abs() < 1e-9);
        assert!((median[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_quantiles_are_symmetric() {
        let f = forecast(vec![10.0], vec![2.0]);
        let low = f.quantile(0.1).unwrap()[0];
        let high = f.quantile(0.9).unwrap()[0];
        assert!((low - (10.0 - 2.0 * 1.2816)).abs() < 0.001);
        assert!((high - (10.0 + 2.0 * 1.2816)).abs() < 0.001);
    }

    #[test]
    fn test_zero_spread_is_point_forecast() {
        let f = forecast(vec![5.0], vec![0.0]);
        assert_eq!(f.quantile(0.0).unwrap(), vec![5.0]);
        assert_eq!(f.quantile(0.9).unwrap(), vec![5.0]);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let start = parse_timestamp("2021-01-01").unwrap();
        let freq = Frequency::parse("1H").unwrap();
        assert!(GaussianForecast::new(vec![1.0], vec![], start, freq).is_err());
        assert!(GaussianForecast::new(vec![1.0], vec![-1.0], start, freq).is_err());
        assert!(GaussianForecast::new(vec![1.0], vec![f64::NAN], start, freq).is_err());
    }
}
