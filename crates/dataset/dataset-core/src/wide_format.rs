//! Wide-format CSV ingestion.
//!
//! One timestamp column indexes every record; each remaining column holds
//! the target of one series and its header is the series' item id.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use dataset_api::WideFormatConfig;
use dataset_spi::{parse_timestamp, DatasetEntry, DatasetError, Result};
use tracing::{debug, info};

use crate::long_format::{csv_error, parse_real};
use crate::uniform::is_uniform;

/// Load a wide-format dataset from a CSV file.
pub fn load_wide_csv<P: AsRef<Path>>(path: P, config: &WideFormatConfig) -> Result<Vec<DatasetEntry>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| DatasetError::Csv(format!("{}: {e}", path.display())))?;
    read_wide_csv(BufReader::new(file), config)
}

/// Read a wide-format dataset from any CSV source with a header row.
///
/// Series appear in column order (or in `config.items` order when given).
/// Records are sorted by timestamp; every series shares the resulting index.
/// Empty cells become `NaN`.
pub fn read_wide_csv<R: Read>(reader: R, config: &WideFormatConfig) -> Result<Vec<DatasetEntry>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let timestamp = find(&config.timestamp)?;

    let items: Vec<(usize, String)> = if config.items.is_empty() {
        headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != timestamp)
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect()
    } else {
        config
            .items
            .iter()
            .map(|name| find(name).map(|i| (i, name.clone())))
            .collect::<Result<Vec<_>>>()?
    };
    if items.is_empty() {
        return Err(DatasetError::MissingColumn("series column".to_string()));
    }

    let mut rows: Vec<(NaiveDateTime, Vec<f64>)> = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let field = |index: usize| record.get(index).unwrap_or_default().trim();

        let values = items
            .iter()
            .map(|(i, name)| parse_real(name, field(*i)))
            .collect::<Result<Vec<_>>>()?;
        rows.push((parse_timestamp(field(timestamp))?, values));
    }
    rows.sort_by_key(|(ts, _)| *ts);

    let timestamps: Vec<NaiveDateTime> = rows.iter().map(|(ts, _)| *ts).collect();
    let Some(&start) = timestamps.first() else {
        return Err(DatasetError::InsufficientData { required: 1, actual: 0 });
    };
    if !is_uniform(&timestamps, config.freq) {
        return Err(DatasetError::NonUniformIndex {
            item_id: config.timestamp.clone(),
            freq: config.freq.to_string(),
        });
    }

    let entries: Vec<DatasetEntry> = items
        .iter()
        .enumerate()
        .map(|(k, (_, name))| {
            let target = rows.iter().map(|(_, values)| values[k]).collect();
            DatasetEntry::new(start, config.freq, target).with_item_id(name.clone())
        })
        .collect();

    debug!(rows = rows.len(), %start, "parsed wide-format rows");
    info!(series = entries.len(), freq = %config.freq, "loaded wide-format dataset");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_spi::Frequency;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DAILY: &str = "timestamp,A,B,C
2021-01-01,1.0,10,100
2021-01-02,2.0,,200
2021-01-03,3.0,30,300
";

    fn config(freq: &str) -> WideFormatConfig {
        WideFormatConfig::new(Frequency::parse(freq).unwrap())
    }

    #[test]
    fn test_one_series_per_column() {
        let entries = read_wide_csv(DAILY.as_bytes(), &config("1D")).unwrap();

        let ids: Vec<_> = entries.iter().map(|e| e.display_id()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        for entry in &entries {
            assert_eq!(entry.start, parse_timestamp("2021-01-01").unwrap());
            assert_eq!(entry.len(), 3);
        }
        assert_eq!(entries[0].target, vec![1.0, 2.0, 3.0]);
        assert!(entries[1].target[1].is_nan());
        assert_eq!(entries[2].target, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_selected_items_and_sorting() {
        let data = "date,A,B
2021-01-01 02:00,3,30
2021-01-01 00:00,1,10
2021-01-01 01:00,2,20
";
        let config = config("1H").timestamp("date").items(&["B"]);
        let entries = read_wide_csv(data.as_bytes(), &config).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item_id.as_deref(), Some("B"));
        assert_eq!(entries[0].target, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_single_column_is_single_series() {
        let data = "timestamp,sales\n2021-01,5\n2021-02,6\n2021-03,7\n";
        let entries = read_wide_csv(data.as_bytes(), &config("M")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_id(), "sales");
        assert_eq!(entries[0].start, parse_timestamp("2021-01").unwrap());
    }

    #[test]
    fn test_errors() {
        let missing = read_wide_csv(DAILY.as_bytes(), &config("1D").items(&["Z"])).unwrap_err();
        assert_eq!(missing, DatasetError::MissingColumn("Z".to_string()));

        let no_series = read_wide_csv("timestamp\n2021-01-01\n".as_bytes(), &config("1D"));
        assert!(matches!(no_series, Err(DatasetError::MissingColumn(_))));

        let empty = read_wide_csv("timestamp,A\n".as_bytes(), &config("1D"));
        assert!(matches!(empty, Err(DatasetError::InsufficientData { .. })));

        let gap = "timestamp,A\n2021-01-01,1\n2021-01-03,3\n";
        let err = read_wide_csv(gap.as_bytes(), &config("1D")).unwrap_err();
        assert!(matches!(err, DatasetError::NonUniformIndex { .. }));

        let bad = "timestamp,A\n2021-01-01,x\n";
        assert!(matches!(
            read_wide_csv(bad.as_bytes(), &config("1D")),
            Err(DatasetError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DAILY.as_bytes()).unwrap();
        assert_eq!(load_wide_csv(file.path(), &config("1D")).unwrap().len(), 3);
        assert!(load_wide_csv("/nonexistent/wide.csv", &config("1D")).is_err());
    }
}
