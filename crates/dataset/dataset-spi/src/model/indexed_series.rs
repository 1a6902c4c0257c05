//! Timestamp-indexed series.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Frequency;

/// Values paired with an explicit timestamp index.
///
/// Produced from validation labels so that scoring aligns observations with
/// forecasts by timestamp rather than by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedSeries {
    /// Series identifier
    pub item_id: Option<String>,
    /// Sampling frequency of the index
    pub freq: Frequency,
    /// Timestamps, one per value
    pub index: Vec<NaiveDateTime>,
    /// Observed values
    pub values: Vec<f64>,
}

impl IndexedSeries {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of `ts` in the index.
    pub fn position(&self, ts: NaiveDateTime) -> Option<usize> {
        self.index.binary_search(&ts).ok()
    }

    /// Values for `len` consecutive timestamps starting at `start`, if the
    /// index covers all of them.
    pub fn window(&self, start: NaiveDateTime, len: usize) -> Option<&[f64]> {
        let from = self.position(start)?;
        self.values.get(from..from.checked_add(len)?)
    }
}
