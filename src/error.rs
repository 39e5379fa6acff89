// ⛔ Fatal errors - anything here aborts the whole run
// Per-code "no answer" outcomes live in resolver.rs, never here

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlcspError {
    /// Input source could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV syntax error
    #[error("Failed to parse CSV line {line} in {source_name}: {message}")]
    Csv {
        source_name: String,
        line: u64,
        message: String,
    },

    /// Row length differs from the header
    #[error("Wrong field count at line {line} in {source_name}: expected {expected} fields, found {found}")]
    FieldCount {
        source_name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Row parsed but is too short for the expected layout
    #[error("Malformed row at line {line} in {source_name}: expected at least {expected} fields, found {found}")]
    MalformedRow {
        source_name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Rate field is not a usable number
    #[error("Invalid rate {value:?} at line {line} in {source_name}")]
    InvalidRate {
        source_name: String,
        line: u64,
        value: String,
    },
}

impl SlcspError {
    /// True for the pricing-data family (bad rate), false for input-shape failures
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SlcspError::InvalidRate { .. })
    }
}
