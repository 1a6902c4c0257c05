//! Dataset Service Provider Interface
//!
//! Defines the time series data model (entries, frequencies, validation
//! instances) and the contracts for splitting a dataset into a training view
//! and held-out validation windows.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{InstanceGenerator, Splitter};
pub use error::{DatasetError, Result};
pub use model::{
    parse_timestamp, DatasetEntry, FreqUnit, Frequency, IndexedSeries, ValidationInstance,
};
