use anyhow::{Context, Result};
use rust_xlsxwriter::Worksheet;

use super::CellFormats;
use super::value::CellValue;
use crate::utils::display_width;

/// Writes the cells of one row left to right.
pub struct RowWriter<'a> {
    worksheet: &'a mut Worksheet,
    formats: &'a CellFormats,
    content_widths: &'a mut Vec<usize>,
    row: u32,
    colnum: u16,
}

impl<'a> RowWriter<'a> {
    pub(crate) fn new(
        worksheet: &'a mut Worksheet,
        formats: &'a CellFormats,
        content_widths: &'a mut Vec<usize>,
        row: u32,
    ) -> Self {
        Self {
            worksheet,
            formats,
            content_widths,
            row,
            colnum: 0,
        }
    }

    /// 0-based row being written.
    pub fn row_num(&self) -> u32 {
        self.row
    }

    /// Number of cells written or skipped so far, i.e. the column the next cell lands in.
    pub fn colnum(&self) -> u16 {
        self.colnum
    }

    /// Writes `value` into the next column. `None` and [`CellValue::Empty`] leave the cell blank.
    pub fn cell(&mut self, value: impl Into<CellValue>) -> Result<&mut Self> {
        let col = self.colnum;
        self.colnum = col.checked_add(1).context("Too many cells in one row")?;

        let value = value.into();
        self.track_width(col, &value);

        match &value {
            CellValue::Empty => {}
            CellValue::Number(n) => {
                self.worksheet.write_number(self.row, col, *n)?;
            }
            CellValue::String(s) => {
                self.worksheet.write_string(self.row, col, s)?;
            }
            CellValue::Bool(b) => {
                self.worksheet.write_boolean(self.row, col, *b)?;
            }
            CellValue::Date(_) | CellValue::DateTime(_) => {
                let format = if matches!(value, CellValue::Date(_)) {
                    &self.formats.date
                } else {
                    &self.formats.datetime
                };

                match value.excel_serial() {
                    Some(serial) => {
                        self.worksheet
                            .write_number_with_format(self.row, col, serial, format)?;
                    }
                    // Excel has no serial for these, keep them readable as text.
                    None => {
                        self.worksheet
                            .write_string(self.row, col, value.to_string())?;
                    }
                }
            }
        }

        Ok(self)
    }

    /// Leaves the next cell blank.
    pub fn skip(&mut self) -> Result<&mut Self> {
        self.cell(CellValue::Empty)
    }

    fn track_width(&mut self, col: u16, value: &CellValue) {
        let col = usize::from(col);
        if self.content_widths.len() <= col {
            self.content_widths.resize(col + 1, 0);
        }

        let width = display_width(&value.to_string());
        self.content_widths[col] = self.content_widths[col].max(width);
    }
}
