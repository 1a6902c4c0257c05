//! Sequential random search.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tuning_api::TuningConfig;
use tuning_spi::{Objective, Optimizer, Result, SearchSpace, StudyResult, TuningError};

use crate::study::{run_trial, Study};

/// Random search driver.
///
/// Draws each hyperparameter independently and uniformly from its declared
/// range with a seeded generator, so a seed fixes the sequence of proposed
/// configurations.
///
/// # Example
///
/// ```rust
/// use tuning_core::{NetworkParams, Objective, Optimizer, RandomSearch, Result};
///
/// struct Depth;
///
/// impl Objective for Depth {
///     type Params = NetworkParams;
///
///     fn metric(&self) -> &str {
///         "depth"
///     }
///
///     fn evaluate(&self, params: &NetworkParams) -> Result<f64> {
///         Ok(params.num_layers as f64)
///     }
/// }
///
/// let result = RandomSearch::new(5, 42).optimize(&Depth).unwrap();
/// assert_eq!(result.trials.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSearch {
    trials: usize,
    seed: u64,
}

impl RandomSearch {
    pub fn new(trials: usize, seed: u64) -> Self {
        Self { trials, seed }
    }

    pub fn from_config(config: &TuningConfig) -> Self {
        Self::new(config.trials, config.seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Configurations this search proposes, in trial order.
    pub fn sample_configurations<P: SearchSpace>(&self) -> Vec<P> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.trials).map(|_| P::sample(&mut rng)).collect()
    }

    pub(crate) fn check_trials(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(TuningError::Configuration(
                "trials must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Optimizer for RandomSearch {
    fn optimize<O: Objective>(&self, objective: &O) -> Result<StudyResult> {
        self.check_trials()?;
        info!(trials = self.trials, seed = self.seed, metric = objective.metric(), "starting random search");

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut study = Study::new(objective.metric());

        for number in 0..self.trials {
            let params = O::Params::sample(&mut rng);
            study.record(run_trial(objective, number, &params));
        }

        let result = study.finish();
        info!(
            completed = result.n_completed(),
            failed = result.n_failed(),
            best = ?result.best_value().ok(),
            "random search finished"
        );
        Ok(result)
    }

    fn trials(&self) -> usize {
        self.trials
    }
}
