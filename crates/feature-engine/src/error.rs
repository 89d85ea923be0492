//! Transform Error Types

use thiserror::Error;

/// Errors during feature transformation
#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// A categorical field holds a value outside its known enumeration
    #[error("{field} value '{value}' is not a recognized category")]
    UnknownCategory { field: &'static str, value: String },

    /// The derived age falls below the lowest age bracket
    #[error("age {age} falls below the lowest age bracket")]
    AgeBelowBracket { age: i32 },

    /// Income is missing and the active policy does not impute
    #[error("customer {id}: income is missing and cannot be imputed in this mode")]
    MissingIncome { id: i64 },

    /// Imputation is impossible because no row in the batch carries income
    #[error("cannot impute income: no row in the batch carries an income value")]
    NoObservedIncome,

    /// The batch holds no records
    #[error("cannot transform an empty batch")]
    EmptyBatch,
}
