use paedsrx_core::ClinicalError;
use thiserror::Error;

use crate::source::DocumentKind;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{document} document not found at {path}")]
    NotFound { document: DocumentKind, path: String },

    #[error("failed to read {document} document at {path}: {reason}")]
    Read {
        document: DocumentKind,
        path: String,
        reason: String,
    },

    #[error("{document} document is not valid JSON: {reason}")]
    Malformed {
        document: DocumentKind,
        reason: String,
    },

    #[error("{document} document failed shape checks: {reason}")]
    Shape {
        document: DocumentKind,
        reason: String,
    },
}

impl SourceError {
    pub fn document(&self) -> DocumentKind {
        match self {
            SourceError::NotFound { document, .. }
            | SourceError::Read { document, .. }
            | SourceError::Malformed { document, .. }
            | SourceError::Shape { document, .. } => *document,
        }
    }
}

impl From<SourceError> for ClinicalError {
    fn from(e: SourceError) -> Self {
        ClinicalError::DataUnavailable {
            document: e.document().to_string(),
            reason: e.to_string(),
        }
    }
}
