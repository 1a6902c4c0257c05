//! Error module containing error types and result aliases

mod dataset_error;

pub use dataset_error::DatasetError;

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
