use log::warn;
use std::collections::{HashMap, HashSet};

use crate::reader::SheetReader;

// Header text per column, built from `header_rows` rows starting at the sheet's first row.
// Multi-row headers are joined with '-'; a blank header cell repeats the last value in its row.
// A repeated header gets a `_2`, `_3`, ... suffix so every column keeps its own key.
pub fn extract_headers(sheet: &SheetReader, header_rows: u32) -> Vec<(u32, String)> {
    let (Some(first_row), Some((first_col, last_col))) =
        (sheet.first_row_num(), sheet.column_bounds())
    else {
        return Vec::new();
    };

    let mut headers = Vec::new();
    let mut last_values_by_row: HashMap<u32, String> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();

    for col in first_col..=last_col {
        let mut header_parts = Vec::with_capacity(header_rows as usize);

        for row in first_row..first_row.saturating_add(header_rows) {
            let Ok(value) = sheet.row(row, |r| r.string(col)) else {
                break;
            };

            if value.is_empty() {
                if let Some(last_value) = last_values_by_row.get(&row) {
                    header_parts.push(last_value.clone());
                }
            } else {
                last_values_by_row.insert(row, value.clone());
                header_parts.push(value);
            }
        }

        let header = header_parts.join("-");
        if header.is_empty() {
            continue;
        }

        let mut key = header.clone();
        let mut n = 2;
        while used.contains(&key) {
            key = format!("{}_{}", header, n);
            n += 1;
        }
        if key != header {
            warn!(
                "Duplicate header '{}' in sheet '{}', using '{}'",
                header,
                sheet.name(),
                key
            );
        }

        used.insert(key.clone());
        headers.push((col, key));
    }

    headers
}
