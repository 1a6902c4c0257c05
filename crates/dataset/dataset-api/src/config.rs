//! Dataset configuration types.

use dataset_spi::{DatasetError, Frequency, Result};
use serde::{Deserialize, Serialize};

/// Configuration for holding out validation windows at the end of each series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Number of observations per label window
    pub prediction_length: usize,
    /// Number of consecutive label windows per series
    pub windows: usize,
}

impl SplitConfig {
    /// Single-window split with the given horizon.
    pub fn new(prediction_length: usize) -> Self {
        Self {
            prediction_length,
            windows: 1,
        }
    }

    /// Set the number of windows (at least one).
    pub fn windows(mut self, windows: usize) -> Self {
        self.windows = windows.max(1);
        self
    }

    /// Negative offset separating training data from the held-out tail.
    ///
    /// Fails when the held-out length does not fit in an `isize`.
    pub fn offset(&self) -> Result<isize> {
        self.prediction_length
            .checked_mul(self.windows)
            .and_then(|held_out| isize::try_from(held_out).ok())
            .map(|held_out| -held_out)
            .ok_or_else(|| DatasetError::InvalidParameter {
                name: "prediction_length".to_string(),
                reason: format!(
                    "{} window(s) of {} exceed the addressable range",
                    self.windows, self.prediction_length
                ),
            })
    }

    /// Check the horizon is positive.
    pub fn validate(&self) -> Result<()> {
        if self.prediction_length == 0 {
            return Err(DatasetError::InvalidParameter {
                name: "prediction_length".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Column mapping for building a dataset from a long-format table, where
/// each row holds one observation of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongFormatConfig {
    /// Target value column
    pub target: String,
    /// Timestamp column
    pub timestamp: String,
    /// Series identifier column; a single series when absent
    pub item_id: Option<String>,
    /// Sampling frequency of every series
    pub freq: Frequency,
    /// Static categorical feature columns (first row of each series is used)
    #[serde(default)]
    pub feat_static_cat: Vec<String>,
    /// Dynamic real feature columns known into the future
    #[serde(default)]
    pub feat_dynamic_real: Vec<String>,
    /// Dynamic real feature columns only known in the past
    #[serde(default)]
    pub past_feat_dynamic_real: Vec<String>,
}

impl LongFormatConfig {
    /// Create a configuration with default column names `target`, `timestamp`
    /// and `item_id`.
    pub fn new(freq: Frequency) -> Self {
        Self {
            target: "target".to_string(),
            timestamp: "timestamp".to_string(),
            item_id: Some("item_id".to_string()),
            freq,
            feat_static_cat: Vec::new(),
            feat_dynamic_real: Vec::new(),
            past_feat_dynamic_real: Vec::new(),
        }
    }

    /// Set the target column.
    pub fn target(mut self, column: &str) -> Self {
        self.target = column.to_string();
        self
    }

    /// Set the timestamp column.
    pub fn timestamp(mut self, column: &str) -> Self {
        self.timestamp = column.to_string();
        self
    }

    /// Set the item id column.
    pub fn item_id(mut self, column: &str) -> Self {
        self.item_id = Some(column.to_string());
        self
    }

    /// Treat the whole table as a single series.
    pub fn single_series(mut self) -> Self {
        self.item_id = None;
        self
    }

    /// Add static categorical columns.
    pub fn feat_static_cat(mut self, columns: &[&str]) -> Self {
        self.feat_static_cat = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add dynamic real columns known into the future.
    pub fn feat_dynamic_real(mut self, columns: &[&str]) -> Self {
        self.feat_dynamic_real = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add dynamic real columns only known in the past.
    pub fn past_feat_dynamic_real(mut self, columns: &[&str]) -> Self {
        self.past_feat_dynamic_real = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}

/// Column mapping for a wide-format table: one timestamp column and one
/// target column per series, named by the series' item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideFormatConfig {
    /// Timestamp column
    pub timestamp: String,
    /// Sampling frequency shared by every series
    pub freq: Frequency,
    /// Series columns to read; every non-timestamp column when empty
    #[serde(default)]
    pub items: Vec<String>,
}

impl WideFormatConfig {
    /// Read every column other than `timestamp` as a series.
    pub fn new(freq: Frequency) -> Self {
        Self {
            timestamp: "timestamp".to_string(),
            freq,
            items: Vec::new(),
        }
    }

    /// Set the timestamp column.
    pub fn timestamp(mut self, column: &str) -> Self {
        self.timestamp = column.to_string();
        self
    }

    /// Restrict ingestion to the given series columns, in this order.
    pub fn items(mut self, columns: &[&str]) -> Self {
        self.items = columns.iter().map(|c| c.to_string()).collect();
        self
    }
}
