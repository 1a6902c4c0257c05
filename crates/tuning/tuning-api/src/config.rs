//! Tuning run configuration.

use std::fs;
use std::path::Path;

use dataset_api::{FreqUnit, Frequency, SplitConfig};
use evaluation_api::{metric_names, EvaluatorConfig, DEFAULT_QUANTILES};
use predictor_api::TrainingContext;
use serde::{Deserialize, Serialize};
use tuning_spi::{Result, TuningError};

/// Settings for one tuning run.
///
/// Loadable from TOML; every field has a default.
///
/// ```toml
/// prediction_length = 24
/// freq = "1H"
/// trials = 50
/// seed = 7
/// metric = "mean_wQuantileLoss"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Forecast horizon and size of the held-out window
    pub prediction_length: usize,
    /// Sampling frequency of the dataset
    pub freq: Frequency,
    /// Number of configurations to evaluate
    pub trials: usize,
    /// Random seed for configuration sampling
    pub seed: u64,
    /// Aggregate metric to minimize
    pub metric: String,
    /// Quantile levels to evaluate
    pub quantiles: Vec<f64>,
    /// Per-trial training budget
    pub epochs: usize,
    /// Suppress model progress output
    pub quiet: bool,
    /// Expected number of series; the dataset size when absent
    pub num_series: Option<usize>,
    /// Evaluate trials on a thread pool
    pub parallel: bool,
    /// Worker threads for parallel search; rayon's default when absent
    pub threads: Option<usize>,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            prediction_length: 24,
            freq: FreqUnit::Hour.into(),
            trials: 20,
            seed: 42,
            metric: metric_names::MEAN_WEIGHTED_QUANTILE_LOSS.to_string(),
            quantiles: DEFAULT_QUANTILES.to_vec(),
            epochs: 5,
            quiet: true,
            num_series: None,
            parallel: false,
            threads: None,
        }
    }
}

impl TuningConfig {
    /// Default settings for the given horizon and frequency.
    pub fn new(prediction_length: usize, freq: Frequency) -> Self {
        Self {
            prediction_length,
            freq,
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| TuningError::Configuration(e.to_string()))
    }

    /// Load a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| TuningError::Configuration(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn metric(mut self, metric: &str) -> Self {
        self.metric = metric.to_string();
        self
    }

    pub fn quantiles(mut self, quantiles: &[f64]) -> Self {
        self.quantiles = quantiles.to_vec();
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn num_series(mut self, num_series: usize) -> Self {
        self.num_series = Some(num_series);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("prediction_length", self.prediction_length),
            ("trials", self.trials),
            ("epochs", self.epochs),
            ("num_series", self.num_series.unwrap_or(1)),
            ("threads", self.threads.unwrap_or(1)),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(TuningError::Configuration(format!("{name} must be positive")));
        }
        if self.metric.is_empty() {
            return Err(TuningError::Configuration("metric must not be empty".to_string()));
        }
        self.evaluator_config().validate()?;
        Ok(())
    }

    /// Split settings: one window of `prediction_length`.
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig::new(self.prediction_length)
    }

    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig::default().quantiles(&self.quantiles)
    }

    pub fn training_context(&self) -> TrainingContext {
        TrainingContext::new(self.prediction_length, self.freq)
            .epochs(self.epochs)
            .quiet(self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = TuningConfig::default();
        assert_eq!(config.metric, "mean_wQuantileLoss");
        assert_eq!(config.quantiles, vec![0.1, 0.5, 0.9]);
        assert_eq!(config.freq.to_string(), "1H");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = TuningConfig::new(7, "1D".parse().unwrap())
            .trials(5)
            .seed(3)
            .metric("RMSE")
            .epochs(2)
            .quiet(false)
            .num_series(10)
            .parallel(true)
            .threads(4);

        assert_eq!(config.prediction_length, 7);
        assert_eq!(config.trials, 5);
        assert_eq!(config.metric, "RMSE");
        assert_eq!(config.num_series, Some(10));

        let context = config.training_context();
        assert_eq!(context.prediction_length, 7);
        assert_eq!(context.epochs, 2);
        assert!(!context.quiet);
        assert_eq!(config.split_config().offset().unwrap(), -7);
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(TuningConfig::default().trials(0).validate().is_err());
        assert!(TuningConfig::default().epochs(0).validate().is_err());
        assert!(TuningConfig::default().num_series(0).validate().is_err());
        assert!(TuningConfig::new(0, "1D".parse().unwrap()).validate().is_err());
        assert!(TuningConfig::default().metric("").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_quantiles() {
        let err = TuningConfig::default()
            .quantiles(&[0.5, 1.5])
            .validate()
            .unwrap_err();
        assert!(matches!(err, TuningError::Evaluation(_)));
    }

    #[test]
    fn test_from_toml() {
        let config = TuningConfig::from_toml_str(
            r#"
            prediction_length = 12
            freq = "3M"
            trials = 8
            quantiles = [0.25, 0.75]
            "#,
        )
        .unwrap();

        assert_eq!(config.prediction_length, 12);
        assert_eq!(config.freq.to_string(), "3M");
        assert_eq!(config.trials, 8);
        assert_eq!(config.quantiles, vec![0.25, 0.75]);
        assert_eq!(config.seed, 42);
        assert!(config.num_series.is_none());
    }

    #[test]
    fn test_from_toml_rejects_bad_frequency() {
        assert!(TuningConfig::from_toml_str("freq = \"fortnightly\"").is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "trials = 3\nseed = 9").unwrap();

        let config = TuningConfig::load(file.path()).unwrap();
        assert_eq!(config.trials, 3);
        assert_eq!(config.seed, 9);

        assert!(TuningConfig::load("/nonexistent/tuning.toml").is_err());
    }
}
