//! Error module containing error types and result aliases

mod evaluation_error;

pub use evaluation_error::EvaluationError;

/// Result type for evaluation operations
pub type Result<T> = std::result::Result<T, EvaluationError>;
