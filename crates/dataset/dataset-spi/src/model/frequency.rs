//! Sampling frequency of a time series.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Base unit of a sampling frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreqUnit {
    /// Minutes
    Minute,
    /// Hours
    Hour,
    /// Calendar days
    Day,
    /// Weeks of seven days
    Week,
    /// Calendar months
    Month,
    /// Calendar quarters
    Quarter,
    /// Calendar years
    Year,
}

impl FreqUnit {
    /// Short alias used when formatting a frequency string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FreqUnit::Minute => "min",
            FreqUnit::Hour => "H",
            FreqUnit::Day => "D",
            FreqUnit::Week => "W",
            FreqUnit::Month => "M",
            FreqUnit::Quarter => "Q",
            FreqUnit::Year => "Y",
        }
    }

    fn from_alias(alias: &str) -> Option<Self> {
        let unit = match alias {
            "min" | "T" => FreqUnit::Minute,
            "H" | "h" => FreqUnit::Hour,
            "D" | "d" => FreqUnit::Day,
            "M" | "MS" | "ME" => FreqUnit::Month,
            "Q" | "QS" | "QE" => FreqUnit::Quarter,
            "Y" | "YS" | "A" | "AS" => FreqUnit::Year,
            a if a == "W" || a.starts_with("W-") => FreqUnit::Week,
            _ => return None,
        };
        Some(unit)
    }
}

/// Fixed sampling frequency: a positive multiple of a [`FreqUnit`].
///
/// Parsed from the pandas-style strings used by dataset tooling, e.g. `"1D"`,
/// `"2H"`, `"3M"` or `"15min"`. A missing multiple means one.
///
/// # Example
///
/// ```rust
/// use dataset_spi::{Frequency, FreqUnit};
///
/// let freq: Frequency = "3M".parse().unwrap();
/// assert_eq!(freq.multiple(), 3);
/// assert_eq!(freq.unit(), FreqUnit::Month);
/// assert_eq!(freq.to_string(), "3M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency {
    multiple: u32,
    unit: FreqUnit,
}

impl Frequency {
    /// Create a frequency from a multiple and a unit.
    pub fn new(multiple: u32, unit: FreqUnit) -> Result<Self> {
        if multiple == 0 {
            return Err(DatasetError::InvalidFrequency(format!(
                "multiple must be positive, got 0{}",
                unit.as_str()
            )));
        }
        Ok(Self { multiple, unit })
    }

    /// Parse a pandas-style frequency string.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits_end = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (digits, alias) = s.split_at(digits_end);

        let multiple = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| DatasetError::InvalidFrequency(s.to_string()))?
        };

        let unit = FreqUnit::from_alias(alias)
            .ok_or_else(|| DatasetError::InvalidFrequency(s.to_string()))?;

        Self::new(multiple, unit)
    }

    /// Number of base units per step.
    pub fn multiple(&self) -> u32 {
        self.multiple
    }

    /// Base unit.
    pub fn unit(&self) -> FreqUnit {
        self.unit
    }

    /// Timestamp `steps` periods after `ts`.
    ///
    /// Month-based units use calendar arithmetic, clamping the day of month
    /// when the target month is shorter. A timestamp on the last day of its
    /// month lands on the last day of the target month, so month-end indices
    /// stay on month ends.
    pub fn advance(&self, ts: NaiveDateTime, steps: usize) -> Result<NaiveDateTime> {
        let overflow = || DatasetError::TimestampOverflow {
            steps,
            freq: self.to_string(),
        };

        let units = (steps as u64)
            .checked_mul(u64::from(self.multiple))
            .and_then(|v| i64::try_from(v).ok())
            .ok_or_else(overflow)?;

        let shifted = match self.unit {
            FreqUnit::Minute => TimeDelta::try_minutes(units).and_then(|d| ts.checked_add_signed(d)),
            FreqUnit::Hour => TimeDelta::try_hours(units).and_then(|d| ts.checked_add_signed(d)),
            FreqUnit::Day => TimeDelta::try_days(units).and_then(|d| ts.checked_add_signed(d)),
            FreqUnit::Week => TimeDelta::try_weeks(units).and_then(|d| ts.checked_add_signed(d)),
            FreqUnit::Month => add_months(ts, units),
            FreqUnit::Quarter => units.checked_mul(3).and_then(|m| add_months(ts, m)),
            FreqUnit::Year => units.checked_mul(12).and_then(|m| add_months(ts, m)),
        };

        shifted.ok_or_else(overflow)
    }
}

fn add_months(ts: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(months).ok()?);
    let shifted = ts.checked_add_months(months)?;
    if is_month_end(ts.date()) {
        Some(month_end(shifted.date())?.and_time(ts.time()))
    } else {
        Some(shifted)
    }
}

fn is_month_end(date: NaiveDate) -> bool {
    date.succ_opt().map_or(true, |next| next.month() != date.month())
}

fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

impl From<FreqUnit> for Frequency {
    /// One step of `unit`.
    fn from(unit: FreqUnit) -> Self {
        Self { multiple: 1, unit }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.multiple, self.unit.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Frequency {
    type Error = DatasetError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_common_aliases() {
        assert_eq!(Frequency::parse("1D").unwrap(), Frequency::new(1, FreqUnit::Day).unwrap());
        assert_eq!(Frequency::parse("2H").unwrap(), Frequency::new(2, FreqUnit::Hour).unwrap());
        assert_eq!(Frequency::parse("3M").unwrap(), Frequency::new(3, FreqUnit::Month).unwrap());
        assert_eq!(
            Frequency::parse("15min").unwrap(),
            Frequency::new(15, FreqUnit::Minute).unwrap()
        );
        assert_eq!(Frequency::parse("W").unwrap(), Frequency::new(1, FreqUnit::Week).unwrap());
        assert_eq!(Frequency::parse("W-SUN").unwrap().unit(), FreqUnit::Week);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Frequency::parse("").is_err());
        assert!(Frequency::parse("3X").is_err());
        assert!(Frequency::parse("0D").is_err());
        assert!(Frequency::parse("D2").is_err());
    }

    #[test]
    fn test_from_unit() {
        assert_eq!(Frequency::from(FreqUnit::Hour), Frequency::parse("H").unwrap());
    }

    #[test]
    fn test_display_round_trips_multiple() {
        assert_eq!(Frequency::parse("3M").unwrap().to_string(), "3M");
        assert_eq!(Frequency::parse("H").unwrap().to_string(), "1H");
    }

    #[test]
    fn test_advance_hours() {
        let freq = Frequency::parse("2H").unwrap();
        assert_eq!(freq.advance(at(2021, 1, 1, 0), 3).unwrap(), at(2021, 1, 1, 6));
        assert_eq!(freq.advance(at(2021, 1, 1, 0), 0).unwrap(), at(2021, 1, 1, 0));
    }

    #[test]
    fn test_advance_days_crosses_month() {
        let freq = Frequency::parse("1D").unwrap();
        assert_eq!(freq.advance(at(2021, 1, 30, 0), 3).unwrap(), at(2021, 2, 2, 0));
    }

    #[test]
    fn test_advance_calendar_months() {
        let freq = Frequency::parse("3M").unwrap();
        assert_eq!(freq.advance(at(2021, 3, 1, 0), 3).unwrap(), at(2021, 12, 1, 0));
        assert_eq!(freq.advance(at(2021, 3, 1, 0), 4).unwrap(), at(2022, 3, 1, 0));
    }

    #[test]
    fn test_advance_quarters_and_years() {
        let q = Frequency::parse("Q").unwrap();
        assert_eq!(q.advance(at(2021, 1, 1, 0), 2).unwrap(), at(2021, 7, 1, 0));

        let y = Frequency::parse("Y").unwrap();
        assert_eq!(y.advance(at(2020, 2, 29, 0), 1).unwrap(), at(2021, 2, 28, 0));
    }

    #[test]
    fn test_advance_keeps_month_end() {
        let m = Frequency::parse("M").unwrap();
        assert_eq!(m.advance(at(2021, 1, 31, 0), 1).unwrap(), at(2021, 2, 28, 0));
        assert_eq!(m.advance(at(2021, 2, 28, 0), 1).unwrap(), at(2021, 3, 31, 0));
        assert_eq!(m.advance(at(2021, 4, 30, 6), 1).unwrap(), at(2021, 5, 31, 6));
        assert_eq!(m.advance(at(2021, 2, 28, 0), 12).unwrap(), at(2022, 2, 28, 0));

        let q = Frequency::parse("Q").unwrap();
        assert_eq!(q.advance(at(2021, 3, 31, 0), 1).unwrap(), at(2021, 6, 30, 0));
        assert_eq!(q.advance(at(2021, 6, 30, 0), 1).unwrap(), at(2021, 9, 30, 0));

        // mid-month days keep their day
        assert_eq!(m.advance(at(2021, 2, 15, 0), 1).unwrap(), at(2021, 3, 15, 0));
    }

    #[test]
    fn test_advance_overflow_is_error() {
        let freq = Frequency::parse("1Y").unwrap();
        let err = freq.advance(at(2021, 1, 1, 0), usize::MAX).unwrap_err();
        assert!(matches!(err, DatasetError::TimestampOverflow { .. }));
    }

    #[test]
    fn test_serde_as_string() {
        let freq = Frequency::parse("2H").unwrap();
        assert_eq!(serde_json::to_string(&freq).unwrap(), "\"2H\"");

        let parsed: Frequency = serde_json::from_str("\"3M\"").unwrap();
        assert_eq!(parsed, Frequency::new(3, FreqUnit::Month).unwrap());
        assert!(serde_json::from_str::<Frequency>("\"bogus\"").is_err());
    }
}
