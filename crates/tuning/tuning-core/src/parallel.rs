//! Parallel random search.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::info;
use tuning_api::TuningConfig;
use tuning_spi::{Objective, Optimizer, Result, StudyResult, TrialRecord, TuningError};

use crate::random::RandomSearch;
use crate::study::{run_trial, Study};

/// Random search with trials evaluated on a rayon thread pool.
///
/// Configurations are drawn up front from the seed in trial order, so a run
/// proposes exactly what [`RandomSearch`] with the same seed proposes. The
/// objective is shared by reference; records are folded into the study in
/// trial order once every trial has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelRandomSearch {
    search: RandomSearch,
    threads: Option<usize>,
}

impl ParallelRandomSearch {
    pub fn new(trials: usize, seed: u64) -> Self {
        Self {
            search: RandomSearch::new(trials, seed),
            threads: None,
        }
    }

    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            search: RandomSearch::from_config(config),
            threads: config.threads,
        }
    }

    /// Use a dedicated pool of `threads` workers instead of the global pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    fn run_all<O: Objective>(&self, configs: &[O::Params], objective: &O) -> Vec<TrialRecord> {
        configs
            .par_iter()
            .enumerate()
            .map(|(number, params)| run_trial(objective, number, params))
            .collect()
    }
}

impl Optimizer for ParallelRandomSearch {
    fn optimize<O: Objective>(&self, objective: &O) -> Result<StudyResult> {
        self.search.check_trials()?;
        let configs: Vec<O::Params> = self.search.sample_configurations();

        info!(
            trials = configs.len(),
            seed = self.search.seed(),
            threads = ?self.threads,
            metric = objective.metric(),
            "starting parallel random search"
        );

        let records = match self.threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| TuningError::Configuration(e.to_string()))?;
                pool.install(|| self.run_all(&configs, objective))
            }
            None => self.run_all(&configs, objective),
        };

        let mut study = Study::new(objective.metric());
        for record in records {
            study.record(record);
        }

        let result = study.finish();
        info!(
            completed = result.n_completed(),
            failed = result.n_failed(),
            best = ?result.best_value().ok(),
            "parallel random search finished"
        );
        Ok(result)
    }

    fn trials(&self) -> usize {
        self.search.trials()
    }
}
