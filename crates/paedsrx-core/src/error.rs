use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use ts_rs::TS;

/// Stable machine-readable classification of a [`ClinicalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorKind {
    DataUnavailable,
    InsufficientInput,
    InvalidPatientData,
    ConditionNotFound,
    MedicationNotFound,
    InvalidDoseConfig,
    InvalidSeverity,
    #[serde(rename = "INTERNAL_ERROR")]
    Internal,
}

impl ErrorKind {
    /// The machine code carried in error envelopes.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::DataUnavailable => "DATA_UNAVAILABLE",
            ErrorKind::InsufficientInput => "INSUFFICIENT_INPUT",
            ErrorKind::InvalidPatientData => "INVALID_PATIENT_DATA",
            ErrorKind::ConditionNotFound => "CONDITION_NOT_FOUND",
            ErrorKind::MedicationNotFound => "MEDICATION_NOT_FOUND",
            ErrorKind::InvalidDoseConfig => "INVALID_DOSE_CONFIG",
            ErrorKind::InvalidSeverity => "INVALID_SEVERITY",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to a clinician.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::DataUnavailable => {
                "Clinical reference data is temporarily unavailable. Please try again later."
            }
            ErrorKind::InsufficientInput => {
                "Insufficient patient data to generate recommendations."
            }
            ErrorKind::InvalidPatientData => "Patient information is incomplete or invalid.",
            ErrorKind::ConditionNotFound => {
                "The specified condition is not recognised in the knowledge base."
            }
            ErrorKind::MedicationNotFound => {
                "The specified medication is not available for this condition."
            }
            ErrorKind::InvalidDoseConfig => "Unable to calculate a safe dose for this medication.",
            ErrorKind::InvalidSeverity => "The severity level is not recognised.",
            ErrorKind::Internal => "An internal error occurred. Please try again.",
        }
    }

    /// Whether the caller can fix the problem by resubmitting.
    pub fn is_recoverable(self) -> bool {
        !matches!(
            self,
            ErrorKind::DataUnavailable | ErrorKind::InvalidDoseConfig
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every failure the decision pipeline can report.
#[derive(Debug, Clone, Error)]
pub enum ClinicalError {
    #[error("{document} data is not available: {reason}")]
    DataUnavailable { document: String, reason: String },

    #[error("insufficient input: {reason}")]
    InsufficientInput { reason: String },

    #[error("{field} {value} is outside the accepted range {constraint}")]
    InvalidPatientData {
        field: String,
        value: f64,
        constraint: String,
    },

    #[error("condition '{condition}' not found")]
    ConditionNotFound {
        condition: String,
        available: Vec<String>,
    },

    #[error("medication '{medication}' not found for condition '{condition}'")]
    MedicationNotFound {
        medication: String,
        condition: String,
        available: Vec<String>,
    },

    #[error("invalid dose configuration for '{medication}' under '{condition}': {reason}")]
    InvalidDoseConfig {
        medication: String,
        condition: String,
        reason: String,
    },

    #[error("unknown severity '{value}' (expected mild, moderate or severe)")]
    InvalidSeverity { value: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ClinicalError {
    pub fn insufficient(reason: impl Into<String>) -> Self {
        ClinicalError::InsufficientInput {
            reason: reason.into(),
        }
    }

    /// Wrap an uncategorized failure. The detail is logged here and only
    /// the generic envelope reaches the caller.
    pub fn internal(err: impl fmt::Display) -> Self {
        let detail = err.to_string();
        tracing::error!(error = %detail, "unexpected failure in clinical pipeline");
        ClinicalError::Internal(detail)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClinicalError::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            ClinicalError::InsufficientInput { .. } => ErrorKind::InsufficientInput,
            ClinicalError::InvalidPatientData { .. } => ErrorKind::InvalidPatientData,
            ClinicalError::ConditionNotFound { .. } => ErrorKind::ConditionNotFound,
            ClinicalError::MedicationNotFound { .. } => ErrorKind::MedicationNotFound,
            ClinicalError::InvalidDoseConfig { .. } => ErrorKind::InvalidDoseConfig,
            ClinicalError::InvalidSeverity { .. } => ErrorKind::InvalidSeverity,
            ClinicalError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }

    /// Structured payload: the rejected value and any available alternatives.
    pub fn context(&self) -> Option<serde_json::Value> {
        match self {
            ClinicalError::DataUnavailable { document, .. } => {
                Some(json!({ "document": document }))
            }
            ClinicalError::InsufficientInput { .. } | ClinicalError::Internal(_) => None,
            ClinicalError::InvalidPatientData {
                field,
                value,
                constraint,
            } => Some(json!({
                "field": field,
                "provided_value": value,
                "accepted_range": constraint,
            })),
            ClinicalError::ConditionNotFound {
                condition,
                available,
            } => Some(json!({
                "condition": condition,
                "available_conditions": available,
            })),
            ClinicalError::MedicationNotFound {
                medication,
                condition,
                available,
            } => Some(json!({
                "medication": medication,
                "condition": condition,
                "available_medications": available,
            })),
            ClinicalError::InvalidDoseConfig {
                medication,
                condition,
                ..
            } => Some(json!({
                "medication": medication,
                "condition": condition,
            })),
            ClinicalError::InvalidSeverity { value } => Some(json!({
                "provided_severity": value,
                "accepted": ["mild", "moderate", "severe"],
            })),
        }
    }

    /// Correction hints for the caller.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ClinicalError::DataUnavailable { .. } => vec![
                "Check that the knowledge store documents exist".to_string(),
                "Validate the JSON format of the knowledge store".to_string(),
            ],
            ClinicalError::InsufficientInput { .. } => vec![
                "Include clinical symptoms or an assessment".to_string(),
                "Provide patient age and weight".to_string(),
            ],
            ClinicalError::InvalidPatientData { .. } => vec![
                "Check age is between 0 and 150 years".to_string(),
                "Check weight is between 0.5 and 500 kg".to_string(),
            ],
            ClinicalError::ConditionNotFound { available, .. } => {
                let mut hints = vec!["Check condition spelling".to_string()];
                if !available.is_empty() {
                    let shown: Vec<&str> = available.iter().take(5).map(String::as_str).collect();
                    hints.push(format!("Available conditions: {}", shown.join(", ")));
                }
                hints
            }
            ClinicalError::MedicationNotFound { available, .. } => {
                let mut hints = vec!["Check medication spelling".to_string()];
                if !available.is_empty() {
                    hints.push(format!("Available medications: {}", available.join(", ")));
                }
                hints
            }
            ClinicalError::InvalidDoseConfig { medication, .. } => vec![
                format!("Review the dosing entry for {medication} in the knowledge store"),
                "Consider an alternative medication".to_string(),
            ],
            ClinicalError::InvalidSeverity { .. } => {
                vec!["Use one of: mild, moderate, severe".to_string()]
            }
            ClinicalError::Internal(_) => vec![
                "Retry the request".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        }
    }
}
