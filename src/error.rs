//! Error types for loading and building tables.

use thiserror::Error;

/// Rejected upload. Always user-facing, never fatal.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file name does not look like CSV.
    #[error("unsupported file type: {name} (expected a .csv file)")]
    UnsupportedFormat { name: String },

    /// No header record at all.
    #[error("the file is empty")]
    Empty,

    /// Malformed record: unequal field count, invalid UTF-8, ...
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// A `Table` invariant would be broken.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' has {found} cells, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
