//! Hyperparameter Tuning Service Provider Interface
//!
//! Defines search spaces, objectives, model factories and the records a
//! search produces.

use std::fmt;
use std::time::Duration;

use dataset_spi::DatasetError;
use evaluation_spi::EvaluationError;
use predictor_spi::{Estimator, TrainingContext};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Tuning errors.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Metric '{metric}' is not finite: {value}")]
    NonFiniteScore { metric: String, value: f64 },

    #[error("Metric '{0}' was not produced by the evaluator")]
    MetricNotFound(String),

    #[error("No trial completed")]
    NoCompletedTrials,
}

pub type Result<T> = std::result::Result<T, TuningError>;

// ============================================================================
// Search Spaces
// ============================================================================

/// Inclusive integer range a hyperparameter is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub name: &'static str,
    pub low: i64,
    pub high: i64,
}

impl IntRange {
    pub const fn new(name: &'static str, low: i64, high: i64) -> Self {
        Self { name, low, high }
    }

    /// Draw a value uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.low..=self.high)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Return `value` if it lies in the range.
    pub fn check(&self, value: i64) -> Result<i64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(TuningError::Configuration(format!(
                "{} = {} is outside [{}, {}]",
                self.name, value, self.low, self.high
            )))
        }
    }
}

/// A strongly typed hyperparameter configuration and the space it is drawn
/// from.
pub trait SearchSpace: Clone + fmt::Debug + Send + Sync + Sized {
    /// Declared ranges, one per hyperparameter.
    fn ranges() -> Vec<IntRange>;

    /// Draw every hyperparameter independently and uniformly.
    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Check every hyperparameter lies in its range.
    fn validate(&self) -> Result<()>;

    /// Named values for logging and reporting.
    fn params(&self) -> Vec<(String, f64)>;
}

// ============================================================================
// Models and Objectives
// ============================================================================

/// Builds an untrained estimator from a configuration.
pub trait ModelFactory: Send + Sync {
    type Params: SearchSpace;

    /// Build an estimator for `params` with the run-wide training settings.
    fn build(
        &self,
        params: &Self::Params,
        context: &TrainingContext,
    ) -> predictor_spi::Result<Box<dyn Estimator>>;
}

/// Scalar objective a search minimizes.
pub trait Objective: Send + Sync {
    type Params: SearchSpace;

    /// Name of the metric the objective returns.
    fn metric(&self) -> &str;

    /// Score one configuration; lower is better.
    fn evaluate(&self, params: &Self::Params) -> Result<f64>;
}

/// Search strategy driving an objective.
pub trait Optimizer: Send + Sync {
    /// Run the search, recording every trial.
    fn optimize<O: Objective>(&self, objective: &O) -> Result<StudyResult>;

    /// Number of trials the search runs.
    fn trials(&self) -> usize;
}

// ============================================================================
// Trial Records
// ============================================================================

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialState {
    Complete,
    Failed,
}

/// One evaluated configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Zero-based trial number.
    pub number: usize,
    /// Parameter name-value pairs.
    pub params: Vec<(String, f64)>,
    /// Objective value of a completed trial.
    pub value: Option<f64>,
    pub state: TrialState,
    /// Failure message of a failed trial.
    pub error: Option<String>,
    /// Wall-clock time spent in the objective.
    pub duration: Duration,
}

impl TrialRecord {
    pub fn get_param(&self, name: &str) -> Option<f64> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn is_complete(&self) -> bool {
        self.state == TrialState::Complete
    }
}

/// Complete search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyResult {
    /// Metric the search minimized.
    pub metric: String,
    /// Every trial in order.
    pub trials: Vec<TrialRecord>,
    /// Index of the best completed trial.
    pub best_trial: Option<usize>,
}

impl StudyResult {
    /// Best completed trial.
    pub fn best_trial(&self) -> Result<&TrialRecord> {
        self.best_trial
            .and_then(|i| self.trials.get(i))
            .ok_or(TuningError::NoCompletedTrials)
    }

    /// Objective value of the best trial.
    pub fn best_value(&self) -> Result<f64> {
        self.best_trial()?
            .value
            .ok_or(TuningError::NoCompletedTrials)
    }

    /// Parameters of the best trial.
    pub fn best_params(&self) -> Result<&[(String, f64)]> {
        Ok(&self.best_trial()?.params)
    }

    pub fn n_completed(&self) -> usize {
        self.trials.iter().filter(|t| t.is_complete()).count()
    }

    pub fn n_failed(&self) -> usize {
        self.trials.len() - self.n_completed()
    }
}
