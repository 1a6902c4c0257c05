//! Seasonal moving average
//!
//! The forecast for a step is the mean of the most recent observations at the
//! same seasonal phase. With a season length of one this is the plain simple
//! moving average. Uncertainty comes from in-sample one-step residuals and
//! widens with the square root of the horizon step.

use crate::{Estimator, Predictor, TrainingContext};
use crate::{Result, TsError};
use dataset_spi::{DatasetEntry, Frequency};
use evaluation_spi::{Forecast, GaussianForecast};
use predictor_core::utils::spread::{horizon_std_errors, residual_std_dev};
use predictor_spi::Result as SpiResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Seasonal Moving Average (SMA) estimator
///
/// Averages the `window` most recent observations that share the seasonal
/// phase of the forecast step.
///
/// # Example
///
/// ```rust
/// use dataset_spi::{parse_timestamp, DatasetEntry, Frequency};
/// use predictor_api::{Estimator, SeasonalMovingAverage, TrainingContext};
///
/// let freq = Frequency::parse("1H").unwrap();
/// let entry = DatasetEntry::new(
///     parse_timestamp("2021-01-01 00:00").unwrap(),
///     freq,
///     (0..48).map(|t| (t % 24) as f64).collect(),
/// );
///
/// let estimator = SeasonalMovingAverage::new(2, 24, TrainingContext::new(6, freq)).unwrap();
/// let predictor = estimator.train(&[entry.clone()]).unwrap();
/// let forecasts = predictor.predict(&[entry]).unwrap();
/// assert_eq!(forecasts[0].mean(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalMovingAverage {
    /// Number of same-phase observations to average
    window: usize,
    /// Number of steps per season
    season_length: usize,
    /// Fixed training settings
    context: TrainingContext,
}

impl SeasonalMovingAverage {
    /// Create a new estimator
    ///
    /// # Arguments
    ///
    /// * `window` - Number of same-phase observations to average (must be >= 1)
    /// * `season_length` - Steps per season (must be >= 1)
    /// * `context` - Horizon and frequency the predictor forecasts at
    pub fn new(window: usize, season_length: usize, context: TrainingContext) -> Result<Self> {
        if window == 0 {
            return Err(TsError::InvalidParameter {
                name: "window".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if season_length == 0 {
            return Err(TsError::InvalidParameter {
                name: "season_length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if context.prediction_length == 0 {
            return Err(TsError::InvalidParameter {
                name: "prediction_length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            window,
            season_length,
            context,
        })
    }

    /// Get window size
    pub fn window_size(&self) -> usize {
        self.window
    }

    /// Get season length
    pub fn season_length(&self) -> usize {
        self.season_length
    }

    /// Mean of up to `window` observed values of `history` that lie a whole
    /// number of seasons before `position`.
    ///
    /// `position` may lie past the end of `history`; `NaN` observations are
    /// skipped.
    pub fn seasonal_mean(
        history: &[f64],
        position: usize,
        window: usize,
        season_length: usize,
    ) -> Option<f64> {
        let values: Vec<f64> = (1..)
            .map(|k| k * season_length)
            .take_while(|&lag| lag <= position)
            .map(|lag| position - lag)
            .filter(|&i| i < history.len())
            .map(|i| history[i])
            .filter(|v| !v.is_nan())
            .take(window)
            .collect();

        mean(&values)
    }

    fn one_step_residuals(&self, target: &[f64]) -> Vec<f64> {
        (self.season_length..target.len())
            .filter_map(|t| {
                let fitted =
                    Self::seasonal_mean(&target[..t], t, self.window, self.season_length)?;
                Some(target[t] - fitted)
            })
            .collect()
    }
}

impl Estimator for SeasonalMovingAverage {
    fn train(&self, training: &[DatasetEntry]) -> SpiResult<Box<dyn Predictor>> {
        let residuals: Vec<f64> = training
            .iter()
            .flat_map(|entry| self.one_step_residuals(&entry.target))
            .collect();

        let std_dev = residual_std_dev(&residuals).ok_or_else(|| TsError::InsufficientData {
            required: self.season_length + 1,
            actual: training.iter().map(DatasetEntry::len).max().unwrap_or(0),
        })?;

        if self.context.quiet {
            debug!(
                window = self.window,
                season_length = self.season_length,
                std_dev,
                "trained seasonal moving average"
            );
        } else {
            info!(
                window = self.window,
                season_length = self.season_length,
                series = training.len(),
                residuals = residuals.len(),
                std_dev,
                "trained seasonal moving average"
            );
        }

        Ok(Box::new(SeasonalMovingAveragePredictor {
            window: self.window,
            season_length: self.season_length,
            prediction_length: self.context.prediction_length,
            freq: self.context.freq,
            std_dev,
        }))
    }
}

/// Predictor produced by [`SeasonalMovingAverage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalMovingAveragePredictor {
    window: usize,
    season_length: usize,
    prediction_length: usize,
    freq: Frequency,
    /// One-step residual standard deviation
    std_dev: f64,
}

impl SeasonalMovingAveragePredictor {
    /// One-step residual standard deviation estimated during training.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn forecast(&self, input: &DatasetEntry) -> SpiResult<GaussianForecast> {
        if input.freq != self.freq {
            return Err(TsError::InvalidData(format!(
                "series '{}' has frequency {}, model was trained at {}",
                input.display_id(),
                input.freq,
                self.freq
            ))
            .into());
        }

        let history = &input.target;
        let n = history.len();

        let mean = (0..self.prediction_length)
            .map(|h| {
                SeasonalMovingAverage::seasonal_mean(history, n + h, self.window, self.season_length)
                    // Too short for a full season: plain moving average
                    .or_else(|| recent_mean(history, self.window))
                    .ok_or_else(|| {
                        TsError::InvalidData(format!(
                            "series '{}' has no observed values",
                            input.display_id()
                        ))
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        let std_dev = horizon_std_errors(self.std_dev, self.prediction_length);
        let start = input.timestamp_at(n)?;

        Ok(GaussianForecast::new(mean, std_dev, start, input.freq)?
            .with_item_id(input.item_id.clone()))
    }
}

impl Predictor for SeasonalMovingAveragePredictor {
    fn prediction_length(&self) -> usize {
        self.prediction_length
    }

    fn predict(&self, inputs: &[DatasetEntry]) -> SpiResult<Vec<Box<dyn Forecast>>> {
        inputs
            .iter()
            .map(|input| -> SpiResult<Box<dyn Forecast>> { Ok(Box::new(self.forecast(input)?)) })
            .collect()
    }
}

fn recent_mean(history: &[f64], window: usize) -> Option<f64> {
    let values: Vec<f64> = history
        .iter()
        .rev()
        .copied()
        .filter(|v| !v.is_nan())
        .take(window)
        .collect();
    mean(&values)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
