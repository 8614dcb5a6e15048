use calamine::Data;

use super::SheetReader;
use super::formatter::format_cell;

/// One row of a [`SheetReader`]. Typed getters parse the formatted cell text and return `None`
/// when it does not parse.
pub struct RowReader<'a> {
    sheet: &'a SheetReader,
    row_num: u32,
}

impl<'a> RowReader<'a> {
    pub(crate) fn new(sheet: &'a SheetReader, row_num: u32) -> Self {
        Self { sheet, row_num }
    }

    pub fn row_num(&self) -> u32 {
        self.row_num
    }

    /// Raw cell value, `None` for an empty cell.
    pub fn value(&self, col: u32) -> Option<&'a Data> {
        self.sheet.value(self.row_num, col)
    }

    pub fn string(&self, col: u32) -> String {
        self.value(col).map(format_cell).unwrap_or_default()
    }

    pub fn boolean(&self, col: u32) -> Option<bool> {
        match self.string(col).to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    pub fn int(&self, col: u32) -> Option<i32> {
        self.string(col).parse().ok()
    }

    pub fn long(&self, col: u32) -> Option<i64> {
        self.string(col).parse().ok()
    }

    pub fn double(&self, col: u32) -> Option<f64> {
        self.string(col).parse().ok()
    }

    /// Last column of this row holding data.
    pub fn last_col(&self) -> Option<u32> {
        let (first_col, last_col) = self.sheet.column_bounds()?;

        (first_col..=last_col)
            .rev()
            .find(|&col| self.value(col).is_some())
    }

    /// Formatted values from the sheet's first column up to this row's last non-empty cell.
    pub fn strings(&self) -> Vec<String> {
        match (self.sheet.column_bounds(), self.last_col()) {
            (Some((first_col, _)), Some(last_col)) => {
                (first_col..=last_col).map(|col| self.string(col)).collect()
            }
            _ => Vec::new(),
        }
    }
}
