//! Evaluation Facade
//!
//! High-level API for scoring probabilistic forecasts. Re-exports all public
//! types from the evaluation stack for convenient usage.

// Re-export everything from core (which includes SPI and API)
pub use evaluation_core::*;

// Re-export core modules for direct access
pub use evaluation_core::{metrics, quantile_evaluator};
