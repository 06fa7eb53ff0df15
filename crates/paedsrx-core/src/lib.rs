//! paedsrx-core
//!
//! Pure domain types, the clinical error type, and the error envelope.
//! No I/O. This is the shared vocabulary of the paedsrx pipeline.

pub mod envelope;
pub mod error;
pub mod models;
pub mod severity;

pub use error::{ClinicalError, ErrorKind};
pub use severity::Severity;
