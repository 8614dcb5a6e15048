mod formatter;
mod row;

use anyhow::{Context, Result, bail};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::error::InvalidInput;
use crate::utils::CellReference;

pub(crate) use formatter::format_number;
pub use formatter::{excel_date_to_iso_string, excel_serial_to_datetime, format_cell};
pub use row::RowReader;

/// Read access to a workbook, one sheet at a time.
pub struct ExcelReader<RS> {
    workbook: Sheets<RS>,
}

impl ExcelReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path)
            .with_context(|| format!("Unable to parse Excel file: {}", path.display()))?;

        debug!("Opened workbook {}", path.display());
        Ok(Self { workbook })
    }
}

impl ExcelReader<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .context("Unable to parse Excel data")?;

        Ok(Self { workbook })
    }
}

impl<RS: Read + Seek> ExcelReader<RS> {
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Runs `block` against a sheet and returns its result.
    ///
    /// `None` selects the first sheet.
    pub fn sheet<T>(
        &mut self,
        name: Option<&str>,
        block: impl FnOnce(&SheetReader) -> T,
    ) -> Result<T> {
        let sheet = self.load_sheet(name)?;
        Ok(block(&sheet))
    }

    fn load_sheet(&mut self, name: Option<&str>) -> Result<SheetReader> {
        let sheet_names = self.sheet_names();

        let name = match name {
            _ if sheet_names.is_empty() => bail!("Sheet not found"),
            None => sheet_names[0].clone(),
            Some(name) if sheet_names.iter().any(|n| n == name) => name.to_string(),
            Some(name) => bail!("Sheet '{}' not found", name),
        };

        let range = self
            .workbook
            .worksheet_range(&name)
            .with_context(|| format!("Unable to read worksheet: {}", name))?;

        let (height, width) = range.get_size();
        debug!("Loaded sheet '{}' ({} rows x {} columns)", name, height, width);

        Ok(SheetReader { name, range })
    }
}

/// A loaded worksheet. Row and column numbers are 0-based and absolute.
pub struct SheetReader {
    name: String,
    range: Range<Data>,
}

impl SheetReader {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First row holding data, `None` for an empty sheet.
    pub fn first_row_num(&self) -> Option<u32> {
        self.range.start().map(|(row, _)| row)
    }

    /// Last row holding data, `None` for an empty sheet.
    pub fn last_row_num(&self) -> Option<u32> {
        self.range.end().map(|(row, _)| row)
    }

    fn has_row(&self, row_num: u32) -> bool {
        match (self.first_row_num(), self.last_row_num()) {
            (Some(first), Some(last)) => (first..=last).contains(&row_num),
            _ => false,
        }
    }

    pub(crate) fn value(&self, row_num: u32, col: u32) -> Option<&Data> {
        self.range
            .get_value((row_num, col))
            .filter(|cell| !matches!(cell, Data::Empty))
    }

    /// First and last column holding data anywhere in the sheet.
    pub fn column_bounds(&self) -> Option<(u32, u32)> {
        self.range
            .start()
            .zip(self.range.end())
            .map(|(start, end)| (start.1, end.1))
    }

    /// Every row from the first to the last, in order.
    pub fn rows<T>(
        &self,
        block: impl FnMut(&RowReader<'_>) -> T,
    ) -> impl Iterator<Item = Result<T>> {
        let (start, end) = match (self.first_row_num(), self.last_row_num()) {
            (Some(first), Some(last)) => (first, last),
            _ => (1, 0),
        };
        self.rows_between(start, end, block)
    }

    /// Rows `start..=end`. A row outside the sheet yields an error item.
    pub fn rows_between<T>(
        &self,
        start: u32,
        end: u32,
        mut block: impl FnMut(&RowReader<'_>) -> T,
    ) -> impl Iterator<Item = Result<T>> {
        (start..=end).map(move |row_num| self.row(row_num, &mut block))
    }

    pub fn row<T>(&self, row_num: u32, block: impl FnOnce(&RowReader<'_>) -> T) -> Result<T> {
        if !self.has_row(row_num) {
            bail!("Row {} not found", row_num);
        }

        Ok(block(&RowReader::new(self, row_num)))
    }

    /// Looks a cell up by an A1-style reference.
    ///
    /// A malformed reference, a missing row or an empty cell all give `Ok(None)`. Column letters
    /// outside `A-Z` are an error, but only once the row is known to exist.
    pub fn cell(&self, reference: &str) -> Result<Option<&Data>, InvalidInput> {
        let Some(reference) = CellReference::parse(reference)? else {
            return Ok(None);
        };

        if !self.has_row(reference.row()) {
            return Ok(None);
        }

        let column = reference.column()?;
        Ok(self.value(reference.row(), column))
    }
}
