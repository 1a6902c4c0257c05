//! Data model for time series datasets.

mod entry;
mod frequency;
mod indexed_series;
mod instance;
mod timestamp;

pub use entry::DatasetEntry;
pub use frequency::{FreqUnit, Frequency};
pub use indexed_series::IndexedSeries;
pub use instance::ValidationInstance;
pub use timestamp::parse_timestamp;
