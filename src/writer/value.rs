use calamine::Data;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

use crate::reader::{excel_serial_to_datetime, format_cell, format_number};

// `num_days_from_ce` of 1899-12-30, the day before serial 1 once the 1900 leap bug is counted.
const EXCEL_EPOCH_DAYS_FROM_CE: i64 = 693_594;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// A value written by [`RowWriter::cell`](super::RowWriter::cell).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    String(String),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Date serial for date values; `None` for non-dates and for dates before 1900-01-01.
    pub fn excel_serial(&self) -> Option<f64> {
        match self {
            CellValue::Date(date) => excel_serial(*date, 0),
            CellValue::DateTime(datetime) => excel_serial(
                datetime.date(),
                datetime.time().num_seconds_from_midnight(),
            ),
            _ => None,
        }
    }
}

fn excel_serial(date: NaiveDate, seconds: u32) -> Option<f64> {
    let days = i64::from(date.num_days_from_ce()) - EXCEL_EPOCH_DAYS_FROM_CE;

    // Serials before 1900-03-01 sit one day lower because of the phantom 1900-02-29.
    let days = match days {
        ..=1 => return None,
        2..=60 => days - 1,
        _ => days,
    };

    Some(days as f64 + f64::from(seconds) / SECONDS_PER_DAY)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::String(s) => f.write_str(s),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CellValue::DateTime(datetime) => {
                write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S"))
            }
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::String(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// Carries a value read by [`crate::reader`] over to a writer. Errors and ISO strings become text.
impl From<&Data> for CellValue {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => CellValue::Empty,
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::String(s) => CellValue::String(s.clone()),
            Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
                Some(datetime) if datetime.time().num_seconds_from_midnight() == 0 => {
                    CellValue::Date(datetime.date())
                }
                Some(datetime) => CellValue::DateTime(datetime),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::Error(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
                CellValue::String(format_cell(value))
            }
        }
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_serials() {
        assert_eq!(CellValue::Date(date(1900, 1, 1)).excel_serial(), Some(1.0));
        assert_eq!(CellValue::Date(date(1900, 2, 28)).excel_serial(), Some(59.0));
        assert_eq!(CellValue::Date(date(1900, 3, 1)).excel_serial(), Some(61.0));
        assert_eq!(CellValue::Date(date(2025, 1, 1)).excel_serial(), Some(45_658.0));
    }

    #[test]
    fn datetime_serial_keeps_the_time_of_day() {
        let noon = date(2025, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(CellValue::DateTime(noon).excel_serial(), Some(45_658.5));
    }

    #[test]
    fn dates_before_1900_have_no_serial() {
        assert_eq!(CellValue::Date(date(1899, 12, 31)).excel_serial(), None);
        assert_eq!(CellValue::Number(1.0).excel_serial(), None);
    }

    #[test]
    fn conversions() {
        assert_eq!(CellValue::from(None::<f64>), CellValue::Empty);
        assert_eq!(CellValue::from(Some("x")), CellValue::String("x".to_string()));
        assert_eq!(CellValue::from(3_i32), CellValue::Number(3.0));
        assert_eq!(CellValue::from(true), CellValue::Bool(true));
    }

    #[test]
    fn converts_read_values() {
        assert_eq!(CellValue::from(&Data::Int(4)), CellValue::Number(4.0));
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
        assert_eq!(
            CellValue::from(&Data::DateTimeIso("2025-01-01".to_string())),
            CellValue::String("2025-01-01".to_string())
        );
    }

    #[test]
    fn display_matches_the_reader() {
        assert_eq!(CellValue::Number(123.0).to_string(), "123");
        assert_eq!(CellValue::Number(123.4).to_string(), "123.4");
        assert_eq!(CellValue::Bool(false).to_string(), "FALSE");
        assert_eq!(CellValue::Date(date(2025, 3, 8)).to_string(), "2025-03-08");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
