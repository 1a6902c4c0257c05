//! Offset-based dataset splitter.

use dataset_api::SplitConfig;
use dataset_spi::{
    DatasetEntry, DatasetError, InstanceGenerator, Result, Splitter, ValidationInstance,
};
use tracing::{debug, info};

/// Splits every series at a fixed negative offset from its end.
///
/// The training view keeps everything before the offset; the returned
/// [`TestGenerator`] produces validation instances from the held-out tail.
///
/// # Example
///
/// ```rust
/// use dataset_core::{
///     parse_timestamp, DatasetEntry, Frequency, InstanceGenerator, OffsetSplitter, Splitter,
/// };
///
/// let entry = DatasetEntry::new(
///     parse_timestamp("2021-01-01").unwrap(),
///     Frequency::parse("1D").unwrap(),
///     (0..100).map(|v| v as f64).collect(),
/// );
///
/// let (train, generator) = OffsetSplitter::new(-10).unwrap().split(&[entry]).unwrap();
/// assert_eq!(train[0].len(), 90);
///
/// let instances = generator.generate_instances(10, 1).unwrap();
/// assert_eq!(instances[0].label.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetSplitter {
    offset: isize,
}

impl OffsetSplitter {
    /// Create a splitter holding out the last `-offset` observations.
    pub fn new(offset: isize) -> Result<Self> {
        if offset >= 0 {
            return Err(DatasetError::InvalidParameter {
                name: "offset".to_string(),
                reason: format!("must be negative, got {offset}"),
            });
        }
        Ok(Self { offset })
    }

    /// Create a splitter holding out every window described by `config`.
    pub fn from_config(config: &SplitConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.offset()?)
    }

    /// Number of observations held out at the end of each series.
    pub fn held_out(&self) -> usize {
        self.offset.unsigned_abs()
    }
}

impl Splitter for OffsetSplitter {
    type Generator = TestGenerator;

    fn split(&self, dataset: &[DatasetEntry]) -> Result<(Vec<DatasetEntry>, TestGenerator)> {
        let held_out = self.held_out();

        for entry in dataset {
            entry.validate()?;
            if entry.len() <= held_out {
                debug!(item_id = entry.display_id(), len = entry.len(), held_out, "series too short to split");
                return Err(DatasetError::InsufficientData {
                    required: held_out + 1,
                    actual: entry.len(),
                });
            }
        }

        let train = dataset
            .iter()
            .map(|entry| head(entry, entry.len() - held_out, 0))
            .collect();

        info!(entries = dataset.len(), held_out, "split dataset");

        Ok((
            train,
            TestGenerator {
                entries: dataset.to_vec(),
                held_out,
            },
        ))
    }
}

/// Generates validation instances from the tail held out by an
/// [`OffsetSplitter`].
#[derive(Debug, Clone)]
pub struct TestGenerator {
    entries: Vec<DatasetEntry>,
    held_out: usize,
}

impl TestGenerator {
    /// Number of observations held out per series.
    pub fn held_out(&self) -> usize {
        self.held_out
    }
}

impl InstanceGenerator for TestGenerator {
    fn generate_instances(
        &self,
        prediction_length: usize,
        windows: usize,
    ) -> Result<Vec<ValidationInstance>> {
        if prediction_length == 0 {
            return Err(DatasetError::InvalidParameter {
                name: "prediction_length".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if windows == 0 {
            return Err(DatasetError::InvalidParameter {
                name: "windows".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let needed = prediction_length.saturating_mul(windows);
        if needed > self.held_out {
            return Err(DatasetError::InvalidParameter {
                name: "prediction_length".to_string(),
                reason: format!(
                    "{windows} window(s) of {prediction_length} exceed the {} held-out observations",
                    self.held_out
                ),
            });
        }

        let mut instances = Vec::with_capacity(self.entries.len() * windows);
        for entry in &self.entries {
            let first_split = entry.len() - self.held_out;
            for window in 0..windows {
                let split = first_split + window * prediction_length;
                instances.push(ValidationInstance {
                    input: head(entry, split, prediction_length),
                    label: slice(entry, split, split + prediction_length)?,
                });
            }
        }

        debug!(
            instances = instances.len(),
            prediction_length, windows, "generated validation instances"
        );

        Ok(instances)
    }

    fn num_entries(&self) -> usize {
        self.entries.len()
    }
}

/// Prefix of `entry` ending before `end`.
///
/// `feat_dynamic_real` rows keep `future` extra values past `end`, as far as
/// they reach.
fn head(entry: &DatasetEntry, end: usize, future: usize) -> DatasetEntry {
    let future_end = end + future;
    DatasetEntry {
        item_id: entry.item_id.clone(),
        start: entry.start,
        freq: entry.freq,
        target: entry.target[..end].to_vec(),
        feat_static_cat: entry.feat_static_cat.clone(),
        feat_dynamic_real: entry
            .feat_dynamic_real
            .iter()
            .map(|row| row[..future_end.min(row.len())].to_vec())
            .collect(),
        past_feat_dynamic_real: entry
            .past_feat_dynamic_real
            .iter()
            .map(|row| row[..end].to_vec())
            .collect(),
    }
}

/// Observations `from..to` of `entry`, re-based to start at `from`.
fn slice(entry: &DatasetEntry, from: usize, to: usize) -> Result<DatasetEntry> {
    Ok(DatasetEntry {
        item_id: entry.item_id.clone(),
        start: entry.timestamp_at(from)?,
        freq: entry.freq,
        target: entry.target[from..to].to_vec(),
        feat_static_cat: entry.feat_static_cat.clone(),
        feat_dynamic_real: entry
            .feat_dynamic_real
            .iter()
            .map(|row| row[from..to].to_vec())
            .collect(),
        past_feat_dynamic_real: entry
            .past_feat_dynamic_real
            .iter()
            .map(|row| row[from..to].to_vec())
            .collect(),
    })
}
