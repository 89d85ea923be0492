//! Batch IO Error Types

use thiserror::Error;

/// Errors while reading or writing a batch of customer records
#[derive(Debug, Error)]
pub enum BatchError {
    /// A row failed to parse into the expected tabular shape
    #[error("malformed batch at line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// The uploaded file carries no data rows
    #[error("uploaded file contains no data rows")]
    Empty,

    /// Writing the annotated export failed
    #[error("CSV export failed: {0}")]
    Export(String),
}
