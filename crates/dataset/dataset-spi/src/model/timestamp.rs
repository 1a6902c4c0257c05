//! Timestamp parsing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{DatasetError, Result};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp string.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` and
/// month periods `YYYY-MM`, which map to midnight on the first of the month.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts);
        }
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        // Month period
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .map_err(|_| DatasetError::InvalidTimestamp(s.to_string()))?;

    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| DatasetError::InvalidTimestamp(s.to_string()))
}
