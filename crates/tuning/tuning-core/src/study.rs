//! Trial execution and study bookkeeping.

use std::time::Instant;

use tracing::{info, warn};
use tuning_spi::{Objective, SearchSpace, StudyResult, TrialRecord, TrialState};

/// Accumulates trial records and tracks the best completed trial.
///
/// Lower objective values are better; on ties the earlier trial is kept.
#[derive(Debug, Clone)]
pub struct Study {
    metric: String,
    trials: Vec<TrialRecord>,
    best: Option<usize>,
}

impl Study {
    pub fn new(metric: &str) -> Self {
        Self {
            metric: metric.to_string(),
            trials: Vec::new(),
            best: None,
        }
    }

    /// Add a finished trial.
    pub fn record(&mut self, trial: TrialRecord) {
        if let Some(value) = trial.value.filter(|_| trial.is_complete()) {
            let improves = self
                .best_value()
                .map_or(true, |best| value < best);
            if improves {
                info!(trial = trial.number, value, params = ?trial.params, "new best trial");
                self.best = Some(self.trials.len());
            }
        }
        self.trials.push(trial);
    }

    /// Objective value of the best trial so far.
    pub fn best_value(&self) -> Option<f64> {
        self.best.and_then(|i| self.trials[i].value)
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn finish(self) -> StudyResult {
        StudyResult {
            metric: self.metric,
            trials: self.trials,
            best_trial: self.best,
        }
    }
}

/// Evaluate one configuration and record the outcome.
///
/// Objective errors mark the trial as failed; they never propagate.
pub fn run_trial<O: Objective>(objective: &O, number: usize, params: &O::Params) -> TrialRecord {
    let named = params.params();
    info!(trial = number, params = ?named, "starting trial");

    let started = Instant::now();
    let outcome = objective.evaluate(params);
    let duration = started.elapsed();

    match outcome {
        Ok(value) => {
            info!(trial = number, value, elapsed_ms = duration.as_millis() as u64, "trial complete");
            TrialRecord {
                number,
                params: named,
                value: Some(value),
                state: TrialState::Complete,
                error: None,
                duration,
            }
        }
        Err(e) => {
            warn!(trial = number, error = %e, "trial failed");
            TrialRecord {
                number,
                params: named,
                value: None,
                state: TrialState::Failed,
                error: Some(e.to_string()),
                duration,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tuning_api::NetworkParams;
    use tuning_spi::{Result, TuningError};

    fn record(number: usize, value: Option<f64>) -> TrialRecord {
        TrialRecord {
            number,
            params: Vec::new(),
            value,
            state: if value.is_some() {
                TrialState::Complete
            } else {
                TrialState::Failed
            },
            error: None,
            duration: Duration::ZERO,
        }
    }

    struct LayersObjective;

    impl Objective for LayersObjective {
        type Params = NetworkParams;

        fn metric(&self) -> &str {
            "layers"
        }

        fn evaluate(&self, params: &NetworkParams) -> Result<f64> {
            if params.num_layers == 5 {
                return Err(TuningError::Training("too deep".to_string()));
            }
            Ok(params.num_layers as f64)
        }
    }

    #[test]
    fn test_best_is_minimum() {
        let mut study = Study::new("MSE");
        study.record(record(0, Some(3.0)));
        study.record(record(1, Some(1.0)));
        study.record(record(2, None));
        study.record(record(3, Some(2.0)));

        assert_eq!(study.len(), 4);
        assert_eq!(study.best_value(), Some(1.0));

        let result = study.finish();
        assert_eq!(result.best_trial().unwrap().number, 1);
        assert_eq!(result.n_failed(), 1);
    }

    #[test]
    fn test_ties_keep_first() {
        let mut study = Study::new("MSE");
        study.record(record(0, Some(1.0)));
        study.record(record(1, Some(1.0)));
        assert_eq!(study.finish().best_trial, Some(0));
    }

    #[test]
    fn test_all_failed() {
        let mut study = Study::new("MSE");
        study.record(record(0, None));
        let result = study.finish();
        assert!(result.best_trial.is_none());
        assert!(matches!(result.best_value(), Err(TuningError::NoCompletedTrials)));
    }

    #[test]
    fn test_run_trial_records_outcome() {
        let ok = run_trial(&LayersObjective, 0, &NetworkParams::new(2, 20).unwrap());
        assert_eq!(ok.state, TrialState::Complete);
        assert_eq!(ok.value, Some(2.0));
        assert_eq!(ok.get_param("hidden_size"), Some(20.0));

        let failed = run_trial(&LayersObjective, 1, &NetworkParams::new(5, 20).unwrap());
        assert_eq!(failed.state, TrialState::Failed);
        assert!(failed.value.is_none());
        assert_eq!(failed.error.as_deref(), Some("Training failed: too deep"));
    }
}
