//! Dataset error types

use thiserror::Error;

/// Errors that can occur while building, validating or splitting a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Frequency string could not be parsed
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// Timestamp string could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Timestamp arithmetic left the representable range
    #[error("Timestamp overflow advancing {steps} steps of {freq}")]
    TimestampOverflow { steps: usize, freq: String },

    /// A series index is not evenly spaced at the declared frequency
    #[error("Series '{item_id}' is not uniformly indexed at frequency {freq}")]
    NonUniformIndex { item_id: String, freq: String },

    /// A dynamic feature row does not match the target length
    #[error("Feature '{feature}' has length {actual}, expected {expected}")]
    FeatureLengthMismatch {
        feature: String,
        expected: usize,
        actual: usize,
    },

    /// A required column is absent from the input
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A field could not be parsed as a number
    #[error("Invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_insufficient_data_error_message() {
        let error = DatasetError::InsufficientData {
            required: 11,
            actual: 10,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 11 points, got 10"
        );
    }

    #[test]
    fn test_invalid_parameter_error_message() {
        let error = DatasetError::InvalidParameter {
            name: "offset".to_string(),
            reason: "must be negative".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid parameter 'offset': must be negative");
    }

    #[test]
    fn test_non_uniform_index_message() {
        let error = DatasetError::NonUniformIndex {
            item_id: "A".to_string(),
            freq: "2H".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Series 'A' is not uniformly indexed at frequency 2H"
        );
    }

    #[test]
    fn test_feature_length_mismatch_message() {
        let error = DatasetError::FeatureLengthMismatch {
            feature: "feat_dynamic_real".to_string(),
            expected: 10,
            actual: 9,
        };
        assert_eq!(
            error.to_string(),
            "Feature 'feat_dynamic_real' has length 9, expected 10"
        );
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error> = Box::new(DatasetError::MissingColumn("target".into()));
        assert!(error.source().is_none());
        assert_eq!(error.to_string(), "Missing column: target");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DatasetError>();
    }
}
