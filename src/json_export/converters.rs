use calamine::Data;
use serde_json::{Value, json};

use crate::reader::{excel_date_to_iso_string, format_cell};

// Convert a cell to its natural JSON type
pub fn cell_to_json(cell: Option<&Data>) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };

    match cell {
        Data::Empty => Value::Null,
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                json!(f.trunc() as i64)
            } else {
                json!(f)
            }
        }
        Data::Int(i) => json!(i),
        Data::Bool(b) => json!(b),
        Data::DateTime(dt) => match excel_date_to_iso_string(dt.as_f64()) {
            Some(iso) => json!(iso),
            None => json!(dt.as_f64()),
        },
        _ => json!(format_cell(cell)),
    }
}
