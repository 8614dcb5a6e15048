mod converters;
mod exporters;
mod extractors;

pub use converters::cell_to_json;
pub use exporters::{
    OrderedSheetData, serialize_to_json, sheet_to_json, workbook_to_json, write_json_to_file,
};
pub use extractors::extract_headers;
