//! paedsrx-extract
//!
//! Turns free-text clinical notes into a structured [`PatientRecord`].
//! Extraction never fails; anything not recognised is left absent.

pub mod recognizers;
pub mod sections;
pub mod symptoms;

use paedsrx_core::models::patient::PatientRecord;
use tracing::debug;

pub use recognizers::{Field, recognizer_order};

/// Extract demographics, vitals, symptoms, and sections from `text`.
pub fn extract(text: &str) -> PatientRecord {
    let text = normalize_line_endings(text);

    let mut record = PatientRecord::default();
    let fields = recognizers::apply(&text, &mut record);
    record.symptoms = symptoms::find(&text);
    record.sections = sections::capture(&text);

    debug!(
        fields,
        symptoms = record.symptoms.len(),
        has_assessment = record.sections.assessment.is_some(),
        "clinical note extracted"
    );
    record
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
