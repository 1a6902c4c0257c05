//! Hyperparameter Tuning Core
//!
//! **WARNING: This is an internal crate. Do not depend on it directly.**
//! **Use `tuning-facade` instead for a stable public API.**
//!
//! The forecast objective, study bookkeeping and random-search drivers.

pub mod objective;
pub mod parallel;
pub mod random;
pub mod study;

pub use objective::ForecastObjective;
pub use parallel::ParallelRandomSearch;
pub use random::RandomSearch;
pub use study::{run_trial, Study};

// Re-export SPI types
pub use tuning_spi::{
    IntRange, ModelFactory, Objective, Optimizer, Result, SearchSpace, StudyResult, TrialRecord,
    TrialState, TuningError,
};

// Re-export API types
pub use tuning_api::{MovingAverageFactory, MovingAverageParams, NetworkParams, TuningConfig};
