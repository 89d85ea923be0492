//! Customer Record Validation
//!
//! Provides the completeness and plausibility checks callers must run before
//! handing records to the feature transformer.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{RecordValidator, ValidationConfig, ValidationResult};
