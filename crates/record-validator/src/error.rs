//! Validation Error Types

use chrono::NaiveDate;
use thiserror::Error;

/// Errors during record validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Enrollment date lies after the reference date
    #[error("enrollment date {date} is after the reference date {reference}")]
    FutureEnrollment {
        date: NaiveDate,
        reference: NaiveDate,
    },

    /// Income is required for a single submission
    #[error("customer {id}: income is required for a single submission")]
    MissingIncome { id: i64 },

    /// A batch row failed validation
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<ValidationError>,
    },
}
