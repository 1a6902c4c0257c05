//! Dataset splitting contracts.

use crate::error::Result;
use crate::model::{DatasetEntry, ValidationInstance};

/// Splits a dataset into a training view and a generator of validation
/// instances.
pub trait Splitter {
    /// Generator returned alongside the training view
    type Generator: InstanceGenerator;

    /// Produce the training view and the instance generator.
    fn split(&self, dataset: &[DatasetEntry]) -> Result<(Vec<DatasetEntry>, Self::Generator)>;
}

/// Produces validation instances from the held-out part of a dataset.
pub trait InstanceGenerator {
    /// Generate `windows` consecutive validation instances per entry, each
    /// with a label of `prediction_length` observations.
    fn generate_instances(
        &self,
        prediction_length: usize,
        windows: usize,
    ) -> Result<Vec<ValidationInstance>>;

    /// Number of entries instances are generated from.
    fn num_entries(&self) -> usize;
}
