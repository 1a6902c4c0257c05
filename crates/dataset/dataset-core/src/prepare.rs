//! Prediction-data preparation.

use dataset_spi::{DatasetEntry, DatasetError, Result};

/// Drop the last `ignore_last_n_targets` observations so `entry` can be
/// used as a prediction input.
///
/// The target and `past_feat_dynamic_real` rows are truncated;
/// `feat_dynamic_real` rows are left intact because they are known over the
/// horizon being predicted.
pub fn prepare_prediction_data(
    entry: &DatasetEntry,
    ignore_last_n_targets: usize,
) -> Result<DatasetEntry> {
    if ignore_last_n_targets > entry.len() {
        return Err(DatasetError::InsufficientData {
            required: ignore_last_n_targets,
            actual: entry.len(),
        });
    }

    let keep = entry.len() - ignore_last_n_targets;
    let mut prepared = entry.clone();
    prepared.target.truncate(keep);
    for row in &mut prepared.past_feat_dynamic_real {
        row.truncate(keep);
    }
    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_spi::{parse_timestamp, Frequency};

    fn entry(target: Vec<f64>) -> DatasetEntry {
        DatasetEntry::new(
            parse_timestamp("2021-01-01").unwrap(),
            Frequency::parse("1H").unwrap(),
            target,
        )
    }

    #[test]
    fn test_truncates_target() {
        let prepared = prepare_prediction_data(&entry((0..20).map(f64::from).collect()), 5).unwrap();
        assert_eq!(prepared.target, (0..15).map(f64::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_truncates_past_features_only() {
        let original = entry(vec![1.0, 2.0, f64::NAN])
            .with_feat_dynamic_real(vec![vec![1.0, 2.0, 3.0]])
            .with_past_feat_dynamic_real(vec![vec![1.0, 2.0, f64::NAN]]);

        let prepared = prepare_prediction_data(&original, 1).unwrap();

        assert_eq!(prepared.start, original.start);
        assert_eq!(prepared.target, vec![1.0, 2.0]);
        assert_eq!(prepared.feat_dynamic_real, vec![vec![1.0, 2.0, 3.0]]);
        assert_eq!(prepared.past_feat_dynamic_real, vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_ignore_more_than_length() {
        assert!(prepare_prediction_data(&entry(vec![1.0]), 2).is_err());
        assert!(prepare_prediction_data(&entry(vec![1.0]), 1).unwrap().is_empty());
    }
}
