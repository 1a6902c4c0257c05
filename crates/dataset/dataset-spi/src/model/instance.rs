//! Validation instances.

use serde::{Deserialize, Serialize};

use super::DatasetEntry;

/// A held-out validation window: the model sees `input` and is scored
/// against `label`.
///
/// `label` starts one period after the last input observation and holds
/// exactly `prediction_length` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationInstance {
    /// History available to the model
    pub input: DatasetEntry,
    /// Held-out observations following the input
    pub label: DatasetEntry,
}
