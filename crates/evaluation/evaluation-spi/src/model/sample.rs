//! Sample-path forecasts.

use chrono::NaiveDateTime;
use dataset_spi::Frequency;

use super::check_quantile;
use crate::contract::Forecast;
use crate::error::{EvaluationError, Result};

/// Forecast represented by Monte Carlo sample paths.
///
/// Quantiles are empirical, interpolating linearly between order
/// statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleForecast {
    samples: Vec<Vec<f64>>,
    start: NaiveDateTime,
    freq: Frequency,
    item_id: Option<String>,
}

impl SampleForecast {
    /// Create a forecast from sample paths of equal length.
    pub fn new(samples: Vec<Vec<f64>>, start: NaiveDateTime, freq: Frequency) -> Result<Self> {
        let Some(first) = samples.first() else {
            return Err(EvaluationError::InvalidForecast(
                "at least one sample path is required".to_string(),
            ));
        };
        let horizon = first.len();
        if samples.iter().any(|path| path.len() != horizon) {
            return Err(EvaluationError::InvalidForecast(
                "sample paths have different lengths".to_string(),
            ));
        }
        Ok(Self {
            samples,
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

    /// Number of sample paths.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Sample paths, one row per path.
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    fn column(&self, step: usize) -> Vec<f64> {
        self.samples.iter().map(|path| path[step]).collect()
    }
}

impl Forecast for SampleForecast {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn freq(&self) -> Frequency {
        self.freq
    }

    fn prediction_length(&self) -> usize {
        self.samples[0].len()
    }

    fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    fn mean(&self) -> Vec<f64> {
        let n = self.samples.len() as f64;
        (0..self.prediction_length())
            .map(|step| self.column(step).iter().sum::<f64>() / n)
            .collect()
    }

    fn quantile(&self, q: f64) -> Result<Vec<f64>> {
        let q = check_quantile(q)?;
        Ok((0..self.prediction_length())
            .map(|step| {
                let mut column = self.column(step);
                column.sort_by(f64::total_cmp);
                interpolate(&column, q)
            })
            .collect())
    }
}

/// Linear interpolation between order statistics of a sorted slice.
fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_spi::parse_timestamp;

    fn forecast(samples: Vec<Vec<f64>>) -> SampleForecast {
        SampleForecast::new(
            samples,
            parse_timestamp("2021-01-01").unwrap(),
            Frequency::parse("1D").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_mean_and_median() {
        let f = forecast(vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![6.0, 30.0]]);
        assert_eq!(f.prediction_length(), 2);
        assert_eq!(f.num_samples(), 3);

        let mean = f.mean();
        assert!((mean[0] - 3.0).abs() < 0.001);
        assert!((mean[1] - 20.0).abs() < 0.001);

        assert_eq!(f.median().unwrap(), vec![2.0, 20.0]);
    }

    #[test]
    fn test_interpolated_quantiles() {
        let f = forecast((0..5).map(|i| vec![i as f64]).collect());
        assert!((f.quantile(0.1).unwrap()[0] - 0.4).abs() < 1e-9);
        assert!((f.quantile(0.9).unwrap()[0] - 3.6).abs() < 1e-9);
        assert_eq!(f.quantile(0.0).unwrap(), vec![0.0]);
        assert_eq!(f.quantile(1.0).unwrap(), vec![4.0]);
        assert!(f.quantile(1.1).is_err());
    }

    #[test]
    fn test_single_path_is_point_forecast() {
        let f = forecast(vec![vec![3.0, 4.0]]);
        assert_eq!(f.quantile(0.1).unwrap(), vec![3.0, 4.0]);
        assert_eq!(f.quantile(0.9).unwrap(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_index() {
        let f = forecast(vec![vec![0.0; 3]]);
        assert_eq!(
            f.index().unwrap(),
            vec![
                parse_timestamp("2021-01-01").unwrap(),
                parse_timestamp("2021-01-02").unwrap(),
                parse_timestamp("2021-01-03").unwrap(),
            ]
        );
    }

    #[test]
    fn test_rejects_ragged_or_empty() {
        let start = parse_timestamp("2021-01-01").unwrap();
        let freq = Frequency::parse("1D").unwrap();
        assert!(SampleForecast::new(vec![], start, freq).is_err());
        assert!(SampleForecast::new(vec![vec![1.0], vec![1.0, 2.0]], start, freq).is_err());
    }
}
