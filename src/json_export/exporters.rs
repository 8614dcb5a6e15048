use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::json_export::converters::cell_to_json;
use crate::json_export::extractors::extract_headers;
use crate::reader::{ExcelReader, SheetReader};

pub type OrderedSheetData = Vec<IndexMap<String, Value>>;

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

pub fn write_json_to_file<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;

    let json_string = serialize_to_json(data)?;

    file.write_all(json_string.as_bytes())
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    Ok(())
}

// One JSON object per data row, keyed by the header text of each column
pub fn sheet_to_json(sheet: &SheetReader, header_rows: u32) -> Result<OrderedSheetData> {
    if header_rows == 0 {
        bail!("Invalid header rows: {}", header_rows);
    }

    let (Some(first_row), Some(last_row)) = (sheet.first_row_num(), sheet.last_row_num()) else {
        return Ok(Vec::new());
    };

    let headers = extract_headers(sheet, header_rows);
    if headers.is_empty() {
        warn!("Sheet '{}' has no header text", sheet.name());
    }

    let data_start = first_row.saturating_add(header_rows);
    let mut sheet_data = Vec::new();

    for row in sheet.rows_between(data_start, last_row, |r| {
        let mut row_data = IndexMap::with_capacity(headers.len());
        for (col, header) in &headers {
            row_data.insert(header.clone(), cell_to_json(r.value(*col)));
        }
        row_data
    }) {
        let row_data = row?;
        if !row_data.is_empty() {
            sheet_data.push(row_data);
        }
    }

    Ok(sheet_data)
}

pub fn workbook_to_json<RS: Read + Seek>(
    reader: &mut ExcelReader<RS>,
    header_rows: u32,
) -> Result<IndexMap<String, OrderedSheetData>> {
    let sheet_names = reader.sheet_names();
    let mut all_sheets = IndexMap::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let sheet_data =
            reader.sheet(Some(name.as_str()), |sheet| sheet_to_json(sheet, header_rows))??;
        all_sheets.insert(name.clone(), sheet_data);
    }

    Ok(all_sheets)
}
