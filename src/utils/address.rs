use std::fmt;

use crate::error::InvalidInput;

/// Converts a column name such as `A`, `Z` or `AA` to its 0-based index.
///
/// Column names are bijective base-26 numerals: every letter is a digit from 1 (`A`) to 26 (`Z`)
/// and there is no zero digit. Only uppercase ASCII letters are accepted.
pub fn column_index(name: &str) -> Result<u32, InvalidInput> {
    if name.is_empty() {
        return Err(InvalidInput::new(name));
    }

    let mut result: u32 = 0;

    for c in name.chars() {
        if !c.is_ascii_uppercase() {
            return Err(InvalidInput::new(name));
        }

        let value = u32::from(c as u8 - b'A' + 1);
        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(value))
            .ok_or_else(|| InvalidInput::new(name))?;
    }

    Ok(result - 1)
}

/// Converts a 0-based column index to its column name (`0` is `A`, `26` is `AA`).
pub fn column_name(index: i64) -> Result<String, InvalidInput> {
    if index < 0 {
        return Err(InvalidInput::new(index));
    }

    Ok(encode_column(index as u64 + 1))
}

// `n` is the 1-based bijective value, so a zero remainder is the digit Z.
fn encode_column(mut n: u64) -> String {
    let mut letters = Vec::with_capacity(4);

    while n > 0 {
        let remainder = n % 26;
        if remainder == 0 {
            letters.push('Z');
            n = n / 26 - 1;
        } else {
            letters.push((b'A' + remainder as u8 - 1) as char);
            n /= 26;
        }
    }

    letters.iter().rev().collect()
}

/// Formats 0-based coordinates as an A1-style reference, e.g. `(0, 26)` becomes `AA1`.
#[must_use]
pub fn cell_reference(row: u32, column: u32) -> String {
    format!("{}{}", encode_column(u64::from(column) + 1), u64::from(row) + 1)
}

/// Splits a reference like `AZ123` into its leading letters and the rest.
///
/// Returns `None` when either half is empty; nothing else is validated here.
#[must_use]
pub fn split_cell_reference(reference: &str) -> Option<(&str, &str)> {
    let split_at = reference
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(reference.len(), |(i, _)| i);

    let (letters, row) = reference.split_at(split_at);
    if letters.is_empty() || row.is_empty() {
        return None;
    }

    Some((letters, row))
}

/// A decoded A1-style reference.
///
/// The row is decoded eagerly, the column letters only on demand, so a lookup can bail out on a
/// missing row before the letters are ever validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReference<'a> {
    letters: &'a str,
    row: u32,
}

impl<'a> CellReference<'a> {
    /// `Ok(None)` means the reference is structurally malformed (no letters, no row number, or
    /// row `0`). A row suffix that is not a number is an error.
    pub fn parse(reference: &'a str) -> Result<Option<Self>, InvalidInput> {
        let Some((letters, row)) = split_cell_reference(reference) else {
            return Ok(None);
        };

        let row: u32 = row.parse().map_err(|_| InvalidInput::new(reference))?;

        Ok(row.checked_sub(1).map(|row| Self { letters, row }))
    }

    /// 0-based row.
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn letters(&self) -> &'a str {
        self.letters
    }

    /// 0-based column, decoded from the letters.
    pub fn column(&self) -> Result<u32, InvalidInput> {
        column_index(self.letters)
    }
}

impl fmt::Display for CellReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letters, u64::from(self.row) + 1)
    }
}
