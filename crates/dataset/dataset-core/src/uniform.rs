//! Uniform index check.

use chrono::NaiveDateTime;
use dataset_spi::Frequency;

/// Whether position `i` of the index is exactly `i` `freq` steps after the
/// first timestamp.
///
/// Steps are measured from the first timestamp, matching how an entry's
/// timestamps are derived from its start. Duplicates, gaps and descending
/// order all fail. Empty and single-element indices are uniform.
pub fn is_uniform(timestamps: &[NaiveDateTime], freq: Frequency) -> bool {
    let Some(&first) = timestamps.first() else {
        return true;
    };
    timestamps
        .iter()
        .enumerate()
        .skip(1)
        .all(|(i, &ts)| freq.advance(first, i).map_or(false, |expected| expected == ts))
}
