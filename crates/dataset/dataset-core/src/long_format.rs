//! Long-format CSV ingestion.
//!
//! Each CSV record holds one observation of one series. Records are grouped
//! by item id, sorted by timestamp within each group and turned into one
//! [`DatasetEntry`] per group.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use dataset_api::LongFormatConfig;
use dataset_spi::{parse_timestamp, DatasetEntry, DatasetError, Result};
use tracing::{debug, info};

use crate::uniform::is_uniform;

/// Load a long-format dataset from a CSV file.
pub fn load_long_csv<P: AsRef<Path>>(path: P, config: &LongFormatConfig) -> Result<Vec<DatasetEntry>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| DatasetError::Csv(format!("{}: {e}", path.display())))?;
    read_long_csv(BufReader::new(file), config)
}

/// Read a long-format dataset from any CSV source with a header row.
///
/// Groups appear in the order their first record appears. Empty target and
/// dynamic feature cells become `NaN`.
pub fn read_long_csv<R: Read>(reader: R, config: &LongFormatConfig) -> Result<Vec<DatasetEntry>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::resolve(&headers, config)?;

    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let row = columns.parse_row(&record, config)?;

        let key = match columns.item_id {
            Some(index) => record.get(index).unwrap_or_default().trim().to_string(),
            None => String::new(),
        };
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(Group {
                item_id: columns.item_id.map(|_| key.clone()),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].rows.push(row);
    }

    let entries = groups
        .into_iter()
        .map(|group| group.into_entry(config))
        .collect::<Result<Vec<_>>>()?;

    info!(series = entries.len(), freq = %config.freq, "loaded long-format dataset");
    Ok(entries)
}

pub(crate) fn csv_error(e: csv::Error) -> DatasetError {
    DatasetError::Csv(e.to_string())
}

/// Header positions of the configured columns.
struct Columns {
    target: usize,
    timestamp: usize,
    item_id: Option<usize>,
    feat_static_cat: Vec<usize>,
    feat_dynamic_real: Vec<usize>,
    past_feat_dynamic_real: Vec<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord, config: &LongFormatConfig) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        let find_all = |names: &[String]| names.iter().map(|n| find(n)).collect::<Result<Vec<_>>>();

        Ok(Self {
            target: find(&config.target)?,
            timestamp: find(&config.timestamp)?,
            item_id: config.item_id.as_deref().map(find).transpose()?,
            feat_static_cat: find_all(&config.feat_static_cat)?,
            feat_dynamic_real: find_all(&config.feat_dynamic_real)?,
            past_feat_dynamic_real: find_all(&config.past_feat_dynamic_real)?,
        })
    }

    fn parse_row(&self, record: &csv::StringRecord, config: &LongFormatConfig) -> Result<Row> {
        let field = |index: usize| record.get(index).unwrap_or_default().trim();

        let reals = |indices: &[usize], names: &[String]| {
            indices
                .iter()
                .zip(names)
                .map(|(&i, name)| parse_real(name, field(i)))
                .collect::<Result<Vec<_>>>()
        };

        let static_cat = self
            .feat_static_cat
            .iter()
            .zip(&config.feat_static_cat)
            .map(|(&i, name)| {
                field(i).parse::<u32>().map_err(|_| DatasetError::InvalidValue {
                    column: name.clone(),
                    value: field(i).to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Row {
            timestamp: parse_timestamp(field(self.timestamp))?,
            target: parse_real(&config.target, field(self.target))?,
            static_cat,
            dynamic_real: reals(&self.feat_dynamic_real, &config.feat_dynamic_real)?,
            past_dynamic_real: reals(&self.past_feat_dynamic_real, &config.past_feat_dynamic_real)?,
        })
    }
}

pub(crate) fn parse_real(column: &str, value: &str) -> Result<f64> {
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    value.parse::<f64>().map_err(|_| DatasetError::InvalidValue {
        column: column.to_string(),
        value: value.to_string(),
    })
}

struct Row {
    timestamp: NaiveDateTime,
    target: f64,
    static_cat: Vec<u32>,
    dynamic_real: Vec<f64>,
    past_dynamic_real: Vec<f64>,
}

struct Group {
    item_id: Option<String>,
    rows: Vec<Row>,
}

impl Group {
    fn into_entry(mut self, config: &LongFormatConfig) -> Result<DatasetEntry> {
        self.rows.sort_by_key(|row| row.timestamp);

        let timestamps: Vec<NaiveDateTime> = self.rows.iter().map(|row| row.timestamp).collect();
        let item_label = self.item_id.clone().unwrap_or_else(|| "<unnamed>".to_string());
        if !is_uniform(&timestamps, config.freq) {
            return Err(DatasetError::NonUniformIndex {
                item_id: item_label,
                freq: config.freq.to_string(),
            });
        }

        // Groups are created from a record, so there is always a first row.
        let Some(first) = self.rows.first() else {
            return Err(DatasetError::InsufficientData { required: 1, actual: 0 });
        };
        let start = first.timestamp;
        let static_cat = first.static_cat.clone();

        let transpose = |width: usize, pick: fn(&Row) -> &[f64]| -> Vec<Vec<f64>> {
            (0..width)
                .map(|k| self.rows.iter().map(|row| pick(row)[k]).collect())
                .collect()
        };
        let feat_dynamic_real = transpose(config.feat_dynamic_real.len(), |row| row.dynamic_real.as_slice());
        let past_feat_dynamic_real =
            transpose(config.past_feat_dynamic_real.len(), |row| row.past_dynamic_real.as_slice());

        let target: Vec<f64> = self.rows.iter().map(|row| row.target).collect();
        debug!(item_id = %item_label, len = target.len(), %start, "built series");

        let mut entry = DatasetEntry::new(start, config.freq, target)
            .with_feat_static_cat(static_cat)
            .with_feat_dynamic_real(feat_dynamic_real)
            .with_past_feat_dynamic_real(past_feat_dynamic_real);
        entry.item_id = self.item_id;
        Ok(entry)
    }
}
