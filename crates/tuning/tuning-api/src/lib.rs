//! Hyperparameter Tuning API
//!
//! Configuration types, typed search spaces and model factories.

pub mod config;
pub mod factory;
pub mod params;

pub use config::*;
pub use factory::*;
pub use params::*;
