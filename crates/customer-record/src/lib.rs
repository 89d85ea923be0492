//! Customer Record Schema and Batch IO
//!
//! Defines the raw customer record as collected by the form and the CSV
//! uploader, plus the batch reader and annotated export.

mod batch;
mod error;
mod record;

pub use batch::{read_batch, write_annotated_csv, AnnotatedRecord};
pub use error::BatchError;
pub use record::{BinaryFlag, RawCustomerRecord};
