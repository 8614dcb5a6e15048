use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

// Last serial Excel can display (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Renders a cell the way it reads in a spreadsheet: integral numbers without a decimal point,
/// booleans as `TRUE`/`FALSE`, dates in ISO form and empty cells as an empty string.
pub fn format_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_date_to_iso_string(serial).unwrap_or_else(|| format_number(serial))
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

pub(crate) fn format_number(f: f64) -> String {
    if f == (f as i64) as f64 && f.abs() < 1e10 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Converts an Excel date serial to a date and time.
///
/// Serials count days from 1899-12-31 and include the phantom 1900-02-29 (serial 60), so
/// every serial from 61 on is one day ahead of a plain day count.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let seconds = (serial * SECONDS_PER_DAY as f64).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Converts an Excel date serial to `YYYY-MM-DD`, or `YYYY-MM-DDTHH:MM:SS` when it has a time part.
pub fn excel_date_to_iso_string(serial: f64) -> Option<String> {
    let datetime = excel_serial_to_datetime(serial)?;

    if datetime.time().num_seconds_from_midnight() == 0 {
        Some(datetime.format("%Y-%m-%d").to_string())
    } else {
        Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}
