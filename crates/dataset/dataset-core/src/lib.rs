//! Dataset Core
//!
//! **WARNING: This is an internal crate. Do not depend on it directly.**
//! **Use `dataset-facade` instead for a stable public API.**
//!
//! Implementations for offset-based splitting, label materialization,
//! long- and wide-format ingestion and prediction-data preparation.

pub mod label;
pub mod long_format;
pub mod prepare;
pub mod splitter;
pub mod uniform;
pub mod wide_format;

// Re-export SPI types
pub use dataset_spi::{
    parse_timestamp, DatasetEntry, DatasetError, FreqUnit, Frequency, IndexedSeries,
    InstanceGenerator, Result, Splitter, ValidationInstance,
};

// Re-export API types
pub use dataset_api::{LongFormatConfig, SplitConfig, WideFormatConfig};

pub use label::{materialize_label, materialize_labels};
pub use long_format::{load_long_csv, read_long_csv};
pub use prepare::prepare_prediction_data;
pub use splitter::{OffsetSplitter, TestGenerator};
pub use uniform::is_uniform;
pub use wide_format::{load_wide_csv, read_wide_csv};
