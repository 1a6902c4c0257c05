//! Dataset Consumer API
//!
//! Configuration types for splitting datasets and ingesting long-format
//! tables.

pub mod config;

pub use config::*;

// Re-export SPI types
pub use dataset_spi::{
    DatasetEntry, DatasetError, FreqUnit, Frequency, IndexedSeries, InstanceGenerator, Result,
    Splitter, ValidationInstance,
};
