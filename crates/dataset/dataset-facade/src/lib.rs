//! Dataset Facade
//!
//! High-level API for time series datasets. Re-exports all public types
//! from the dataset stack for convenient usage.

// Re-export everything from core (which includes SPI and API)
pub use dataset_core::*;

// Re-export core modules for direct access
pub use dataset_core::{label, long_format, prepare, splitter, uniform, wide_format};
