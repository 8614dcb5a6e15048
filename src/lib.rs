//! Nested builder-style reading and writing of Excel workbooks.
//!
//! [`reader`] wraps calamine, [`writer`] wraps rust_xlsxwriter, and [`utils`] holds the
//! column-letter and column-width arithmetic both sides share.

pub mod error;
pub mod json_export;
pub mod reader;
pub mod utils;
pub mod writer;

pub use error::InvalidInput;
pub use reader::{ExcelReader, RowReader, SheetReader};
pub use writer::{CellValue, ExcelWriter, RowWriter, SheetWriter, WriterOptions, excel};
