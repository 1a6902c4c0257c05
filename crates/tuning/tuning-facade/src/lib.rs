//! Hyperparameter Tuning Facade
//!
//! Unified re-exports for the tuning module: typed search spaces, the
//! forecast objective that splits, trains, predicts and scores, and the
//! random-search drivers that minimize it.
//!
//! # Example
//!
//! ```rust,no_run
//! use tuning_facade::{
//!     ForecastObjective, MovingAverageFactory, Optimizer, RandomSearch, TuningConfig,
//! };
//! # fn dataset() -> Vec<dataset_facade::DatasetEntry> { Vec::new() }
//!
//! let config = TuningConfig::new(7, "1D".parse().unwrap()).trials(10);
//! let objective = ForecastObjective::new(&dataset(), MovingAverageFactory, &config).unwrap();
//! let result = RandomSearch::from_config(&config).optimize(&objective).unwrap();
//! println!("best: {:?}", result.best_params());
//! ```

// Re-export everything from SPI
pub use tuning_spi::*;

// Re-export everything from API
pub use tuning_api::*;

// Re-export everything from Core
pub use tuning_core::*;

pub use tuning_api::{config, factory, params};
pub use tuning_core::{objective, parallel, random, study};
