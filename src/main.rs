use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use dexcel::json_export;
use dexcel::reader::{ExcelReader, RowReader, format_cell};
use dexcel::utils::{
    character_width_to_256_width, column_index, column_name, pixel_to_character_width,
};
use dexcel::writer::{CellValue, ExcelWriter, WriterOptions};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a column name (e.g. AZ) to its 0-based index, or an index to its name
    Column {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Convert a column width to 1/256ths of a character
    Width {
        /// Width in pixels
        #[arg(
            long,
            allow_hyphen_values = true,
            conflicts_with = "chars",
            required_unless_present = "chars"
        )]
        pixels: Option<i32>,

        /// Width in characters
        #[arg(long, allow_hyphen_values = true)]
        chars: Option<f64>,
    },

    /// Print the value of one cell, e.g. B12
    Cell {
        /// Excel file path
        file_path: PathBuf,

        /// A1-style cell reference
        reference: String,

        /// Sheet name (defaults to the first sheet)
        #[arg(long, short = 's')]
        sheet: Option<String>,
    },

    /// Export sheets to JSON
    Export {
        /// Excel file path
        file_path: PathBuf,

        /// Export a single sheet instead of all of them
        #[arg(long, short = 's')]
        sheet: Option<String>,

        /// Number of header rows
        #[arg(long, short = 'r', default_value = "1")]
        header_rows: u32,

        /// Write the JSON to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Copy every sheet into a new workbook with columns fitted to their content
    Autosize {
        /// Excel file to read
        input: PathBuf,

        /// .xlsx file to write
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Column { value } => {
            // Anything numeric is an index, everything else a name
            match value.parse::<i64>() {
                Ok(index) => println!("{}", column_name(index)?),
                Err(_) => println!("{}", column_index(&value)?),
            }
        }
        Command::Width { pixels, chars } => {
            if let Some(pixels) = pixels {
                println!("{}", pixel_to_character_width(pixels));
            } else if let Some(chars) = chars {
                println!("{}", character_width_to_256_width(chars));
            }
        }
        Command::Cell {
            file_path,
            reference,
            sheet,
        } => {
            let mut reader = ExcelReader::open(&file_path)?;
            let value = reader.sheet(sheet.as_deref(), |s| {
                s.cell(&reference).map(|cell| cell.map(format_cell))
            })??;

            match value {
                Some(value) => println!("{}", value),
                None => {
                    eprintln!("dexcel error: Cell {} not found.", reference);
                    std::process::exit(1);
                }
            }
        }
        Command::Export {
            file_path,
            sheet,
            header_rows,
            output,
        } => {
            let mut reader = ExcelReader::open(&file_path)?;

            match sheet {
                Some(name) => {
                    let sheet_data = reader.sheet(Some(name.as_str()), |s| {
                        json_export::sheet_to_json(s, header_rows)
                    })??;
                    emit_json(&sheet_data, output.as_deref())?;
                }
                None => {
                    let all_sheets = json_export::workbook_to_json(&mut reader, header_rows)?;
                    emit_json(&all_sheets, output.as_deref())?;
                }
            }
        }
        Command::Autosize { input, output } => autosize(&input, &output)?,
    }

    Ok(())
}

fn emit_json<T: Serialize>(data: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => json_export::write_json_to_file(data, path),
        None => {
            println!("{}", json_export::serialize_to_json(data)?);
            Ok(())
        }
    }
}

fn autosize(input: &Path, output: &Path) -> Result<()> {
    let mut reader = ExcelReader::open(input)?;
    let mut writer = ExcelWriter::new(WriterOptions::auto_sized());

    for name in reader.sheet_names() {
        let (first_row, rows) = reader.sheet(Some(name.as_str()), |sheet| {
            let rows = sheet.rows(row_values).collect::<Result<Vec<_>>>()?;
            Ok::<_, anyhow::Error>((sheet.first_row_num().unwrap_or(0), rows))
        })??;

        writer.sheet(&name, |sheet| {
            // Keep the original row positions
            for _ in 0..first_row {
                sheet.row(|_| Ok(()))?;
            }

            for values in &rows {
                sheet.row(|row| {
                    for value in values {
                        row.cell(value.clone())?;
                    }
                    Ok(())
                })?;
            }

            Ok(())
        })?;
    }

    writer.save(output)
}

// Cells from column A up to the last non-empty cell of the row
fn row_values(row: &RowReader<'_>) -> Vec<CellValue> {
    let Some(last_col) = row.last_col() else {
        return Vec::new();
    };

    (0..=last_col)
        .map(|col| row.value(col).map_or(CellValue::Empty, CellValue::from))
        .collect()
}
