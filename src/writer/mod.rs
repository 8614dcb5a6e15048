mod row;
mod sheet;
mod value;

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use log::debug;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

pub use row::RowWriter;
pub use sheet::SheetWriter;
pub use value::CellValue;

/// Settings shared by every sheet of an [`ExcelWriter`].
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Fit the columns of each sheet to their content once the sheet is complete.
    pub auto_size_columns: bool,
    pub date_format: String,
    pub datetime_format: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            auto_size_columns: false,
            date_format: "yyyy-mm-dd".to_string(),
            datetime_format: "yyyy-mm-dd hh:mm:ss".to_string(),
        }
    }
}

impl WriterOptions {
    pub fn auto_sized() -> Self {
        Self {
            auto_size_columns: true,
            ..Self::default()
        }
    }
}

pub(crate) struct CellFormats {
    pub(crate) date: Format,
    pub(crate) datetime: Format,
}

/// Builds a workbook, runs `block` against it and writes the result to `output`.
pub fn excel<W: Write>(
    output: W,
    options: WriterOptions,
    block: impl FnOnce(&mut ExcelWriter) -> Result<()>,
) -> Result<()> {
    let mut writer = ExcelWriter::new(options);
    block(&mut writer)?;
    writer.write(output)
}

pub struct ExcelWriter {
    workbook: Workbook,
    options: WriterOptions,
    formats: CellFormats,
    column_widths: IndexMap<String, BTreeMap<u16, i32>>,
}

impl ExcelWriter {
    pub fn new(options: WriterOptions) -> Self {
        let formats = CellFormats {
            date: Format::new().set_num_format(&options.date_format),
            datetime: Format::new().set_num_format(&options.datetime_format),
        };

        Self {
            workbook: Workbook::new(),
            options,
            formats,
            column_widths: IndexMap::new(),
        }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Adds a sheet named `name` and fills it through `block`.
    ///
    /// The sheet joins the workbook only once `block` and auto-sizing succeed, so a failed sheet
    /// leaves nothing behind.
    pub fn sheet(
        &mut self,
        name: &str,
        block: impl FnOnce(&mut SheetWriter<'_>) -> Result<()>,
    ) -> Result<()> {
        if self.column_widths.keys().any(|n| n.eq_ignore_ascii_case(name)) {
            bail!("Sheet '{}' already exists", name);
        }

        let mut worksheet = Worksheet::new();
        worksheet
            .set_name(name)
            .with_context(|| format!("Invalid sheet name: {}", name))?;

        let mut sheet = SheetWriter::new(&mut worksheet, &self.options, &self.formats);
        block(&mut sheet)?;

        let rows = sheet.rownum();
        let widths = sheet.finish()?;
        debug!("Wrote sheet '{}' with {} rows", name, rows);

        self.workbook.push_worksheet(worksheet);
        self.column_widths.insert(name.to_string(), widths);
        Ok(())
    }

    /// Final column widths of a finished sheet, in 1/256ths of a character.
    pub fn column_widths(&self, sheet_name: &str) -> Option<&BTreeMap<u16, i32>> {
        self.column_widths.get(sheet_name)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.column_widths.keys().cloned().collect()
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.workbook
            .save_to_buffer()
            .context("Failed to serialize workbook")
    }

    pub fn write<W: Write>(&mut self, mut output: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        output
            .write_all(&bytes)
            .context("Failed to write workbook")?;
        output.flush().context("Failed to write workbook")
    }

    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.workbook
            .save(path)
            .with_context(|| format!("Failed to save workbook: {}", path.display()))
    }
}
