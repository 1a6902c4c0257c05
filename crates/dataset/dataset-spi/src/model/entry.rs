//! A single time series in a dataset.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Frequency;
use crate::error::{DatasetError, Result};

/// One physical time series: target values, start timestamp, sampling
/// frequency, optional identifier and optional covariates.
///
/// Position `i` of the target is observed at `start + i * freq`. Rows of
/// `past_feat_dynamic_real` have one value per target observation. Rows of
/// `feat_dynamic_real` have at least that many and may run past the end of
/// the target, as they do in prediction inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Series identifier
    pub item_id: Option<String>,
    /// Timestamp of the first observation
    pub start: NaiveDateTime,
    /// Sampling frequency
    pub freq: Frequency,
    /// Observed values
    pub target: Vec<f64>,
    /// Static categorical features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feat_static_cat: Vec<u32>,
    /// Dynamic real features known into the future, one row per feature
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feat_dynamic_real: Vec<Vec<f64>>,
    /// Dynamic real features only known up to the present, one row per feature
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub past_feat_dynamic_real: Vec<Vec<f64>>,
}

impl DatasetEntry {
    /// Create an entry without identifier or covariates.
    pub fn new(start: NaiveDateTime, freq: Frequency, target: Vec<f64>) -> Self {
        Self {
            item_id: None,
            start,
            freq,
            target,
            feat_static_cat: Vec::new(),
            feat_dynamic_real: Vec::new(),
            past_feat_dynamic_real: Vec::new(),
        }
    }

    /// Set the series identifier.
    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    /// Set static categorical features.
    pub fn with_feat_static_cat(mut self, cats: Vec<u32>) -> Self {
        self.feat_static_cat = cats;
        self
    }

    /// Set dynamic real features known into the future.
    pub fn with_feat_dynamic_real(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.feat_dynamic_real = rows;
        self
    }

    /// Set dynamic real features only known in the past.
    pub fn with_past_feat_dynamic_real(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.past_feat_dynamic_real = rows;
        self
    }

    /// Number of target observations.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Whether the target is empty.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Identifier for messages and logs, `"<unnamed>"` when absent.
    pub fn display_id(&self) -> &str {
        self.item_id.as_deref().unwrap_or("<unnamed>")
    }

    /// Timestamp of the observation at `position`.
    ///
    /// `position` may equal `len()`, giving the first timestamp after the
    /// series.
    pub fn timestamp_at(&self, position: usize) -> Result<NaiveDateTime> {
        self.freq.advance(self.start, position)
    }

    /// Check dynamic feature row lengths against the target length.
    pub fn validate(&self) -> Result<()> {
        let expected = self.target.len();
        check_rows("feat_dynamic_real", &self.feat_dynamic_real, expected, true)?;
        check_rows("past_feat_dynamic_real", &self.past_feat_dynamic_real, expected, false)
    }
}

fn check_rows(feature: &str, rows: &[Vec<f64>], expected: usize, may_extend: bool) -> Result<()> {
    let bad = rows.iter().find(|row| {
        if may_extend {
            row.len() < expected
        } else {
            row.len() != expected
        }
    });
    match bad {
        Some(row) => Err(DatasetError::FeatureLengthMismatch {
            feature: feature.to_string(),
            expected,
            actual: row.len(),
        }),
        None => Ok(()),
    }
}
