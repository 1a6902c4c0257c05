//! Label materialization.

use dataset_spi::{DatasetEntry, IndexedSeries, Result, ValidationInstance};

/// Convert a validation label into a timestamp-indexed series.
///
/// The index is `start, start + 1·freq, …, start + (n − 1)·freq`, computed
/// with the same [`Frequency::advance`](dataset_spi::Frequency::advance) used
/// to index forecasts, so labels and forecasts line up by timestamp.
pub fn materialize_label(label: &DatasetEntry) -> Result<IndexedSeries> {
    let index = (0..label.len())
        .map(|position| label.timestamp_at(position))
        .collect::<Result<Vec<_>>>()?;

    Ok(IndexedSeries {
        item_id: label.item_id.clone(),
        freq: label.freq,
        index,
        values: label.target.clone(),
    })
}

/// Materialize the labels of every instance, preserving order.
pub fn materialize_labels(instances: &[ValidationInstance]) -> Result<Vec<IndexedSeries>> {
    instances
        .iter()
        .map(|instance| materialize_label(&instance.label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_spi::{parse_timestamp, Frequency};

    #[test]
    fn test_index_matches_frequency() {
        let label = DatasetEntry::new(
            parse_timestamp("2021-01-01 00:00").unwrap(),
            Frequency::parse("2H").unwrap(),
            vec![1.0, 2.0, 3.0],
        )
        .with_item_id("A");

        let series = materialize_label(&label).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.item_id.as_deref(), Some("A"));
        assert_eq!(
            series.index,
            vec![
                parse_timestamp("2021-01-01 00:00").unwrap(),
                parse_timestamp("2021-01-01 02:00").unwrap(),
                parse_timestamp("2021-01-01 04:00").unwrap(),
            ]
        );
        assert_eq!(series.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_month_index() {
        let label = DatasetEntry::new(
            parse_timestamp("2021-11").unwrap(),
            Frequency::parse("1M").unwrap(),
            vec![1.0, 2.0, 3.0],
        );
        let series = materialize_label(&label).unwrap();
        assert_eq!(series.index[2], parse_timestamp("2022-01").unwrap());
    }

    #[test]
    fn test_window_lookup() {
        let label = DatasetEntry::new(
            parse_timestamp("2021-01-01").unwrap(),
            Frequency::parse("1D").unwrap(),
            vec![1.0, 2.0, 3.0, 4.0],
        );
        let series = materialize_label(&label).unwrap();

        let from = parse_timestamp("2021-01-02").unwrap();
        assert_eq!(series.window(from, 2), Some(&[2.0, 3.0][..]));
        assert_eq!(series.window(from, 4), None);
        assert_eq!(series.window(parse_timestamp("2020-12-31").unwrap(), 1), None);
    }
}
