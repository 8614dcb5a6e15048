use thiserror::Error;

/// Raised when a column name or column index cannot be converted.
///
/// The offending input is kept verbatim so callers can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {input}")]
pub struct InvalidInput {
    input: String,
}

impl InvalidInput {
    pub fn new(input: impl ToString) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
