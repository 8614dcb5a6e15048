use anyhow::{Result, bail};
use log::debug;
use rust_xlsxwriter::Worksheet;
use std::collections::BTreeMap;

use super::row::RowWriter;
use super::{CellFormats, WriterOptions};
use crate::utils::{
    AUTO_SIZE_PADDING_PIXELS, character_width_to_256_width, pixel_to_character_width,
};

// Excel caps column widths at 255 characters.
const MAX_COLUMN_WIDTH_256: i32 = 255 * 256;
// Width of a column nobody sized, 8 characters.
const DEFAULT_COLUMN_WIDTH_256: i32 = 8 * 256;

/// Appends rows to one worksheet, top to bottom.
pub struct SheetWriter<'a> {
    worksheet: &'a mut Worksheet,
    options: &'a WriterOptions,
    formats: &'a CellFormats,
    rownum: u32,
    column_widths: BTreeMap<u16, i32>,
    content_widths: Vec<usize>,
    auto_size_columns: Option<u16>,
}

impl<'a> SheetWriter<'a> {
    pub(crate) fn new(
        worksheet: &'a mut Worksheet,
        options: &'a WriterOptions,
        formats: &'a CellFormats,
    ) -> Self {
        Self {
            worksheet,
            options,
            formats,
            rownum: 0,
            column_widths: BTreeMap::new(),
            content_widths: Vec::new(),
            auto_size_columns: None,
        }
    }

    /// Number of rows written so far, i.e. the row the next [`row`](Self::row) call fills.
    pub fn rownum(&self) -> u32 {
        self.rownum
    }

    pub fn row(&mut self, block: impl FnOnce(&mut RowWriter<'_>) -> Result<()>) -> Result<()> {
        let row = self.rownum;
        self.rownum += 1;

        let mut writer = RowWriter::new(
            self.worksheet,
            self.formats,
            &mut self.content_widths,
            row,
        );
        block(&mut writer)?;

        // The first non-empty row decides how many columns get auto-sized.
        if self.auto_size_columns.is_none() && writer.colnum() > 0 {
            self.auto_size_columns = Some(writer.colnum());
        }

        Ok(())
    }

    /// Column width in 1/256ths of a character, if one was set on this sheet.
    pub fn column_width(&self, col: u16) -> Option<i32> {
        self.column_widths.get(&col).copied()
    }

    /// Sets a column width in 1/256ths of a character.
    pub fn set_column_width(&mut self, col: u16, width_256: i32) -> Result<()> {
        if !(0..=MAX_COLUMN_WIDTH_256).contains(&width_256) {
            bail!(
                "Column width {} is out of range (0..={})",
                width_256,
                MAX_COLUMN_WIDTH_256
            );
        }

        self.worksheet.set_column_width(col, f64::from(width_256) / 256.0)?;
        self.column_widths.insert(col, width_256);

        Ok(())
    }

    /// Content width of a column in characters, measured over every cell written to it.
    pub fn content_width(&self, col: u16) -> usize {
        self.content_widths
            .get(usize::from(col))
            .copied()
            .unwrap_or(0)
    }

    /// Applies auto-sizing if enabled and hands back the final width store.
    pub(crate) fn finish(mut self) -> Result<BTreeMap<u16, i32>> {
        if !self.options.auto_size_columns {
            return Ok(self.column_widths);
        }

        let columns = self.auto_size_columns.unwrap_or(0);
        let padding = pixel_to_character_width(AUTO_SIZE_PADDING_PIXELS);

        for col in 0..columns {
            // A column without content keeps its current width and only gets the padding.
            let width = match self.content_width(col) {
                0 => self
                    .column_width(col)
                    .unwrap_or(DEFAULT_COLUMN_WIDTH_256),
                content => character_width_to_256_width(content as f64),
            };
            self.set_column_width(col, (width + padding).min(MAX_COLUMN_WIDTH_256))?;
        }

        debug!("Auto-sized {} columns over {} rows", columns, self.rownum);
        Ok(self.column_widths)
    }
}
