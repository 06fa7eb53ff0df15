//! Stable error-response envelope.
//!
//! Every typed [`ClinicalError`] (and any uncategorized failure wrapped as
//! [`ClinicalError::Internal`]) is reported to callers in the same shape.

use serde::{Deserialize, Serialize};
use serde_json::json;
use ts_rs::TS;

use crate::error::{ClinicalError, ErrorKind};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorEnvelope {
    pub code: ErrorKind,
    pub message: String,
    pub user_message: String,
    pub recoverable: bool,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<serde_json::Value>,
}

impl From<&ClinicalError> for ErrorEnvelope {
    fn from(err: &ClinicalError) -> Self {
        let kind = err.kind();
        // Internal detail stays in the logs.
        let message = match err {
            ClinicalError::Internal(_) => "an unexpected error occurred".to_string(),
            other => other.to_string(),
        };
        ErrorEnvelope {
            code: kind,
            message,
            user_message: kind.user_message().to_string(),
            recoverable: kind.is_recoverable(),
            suggestions: err.suggestions(),
            details: err.context(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorEnvelope,
}

impl From<&ClinicalError> for ErrorResponse {
    fn from(err: &ClinicalError) -> Self {
        if err.is_recoverable() {
            tracing::warn!(code = err.kind().code(), error = %err, "recoverable clinical error");
        } else {
            tracing::error!(code = err.kind().code(), error = %err, "non-recoverable clinical error");
        }
        ErrorResponse {
            success: false,
            error: ErrorEnvelope::from(err),
        }
    }
}

/// Convert a pipeline result into the response document returned to callers.
///
/// Success yields `{"success": true, "data": …}`; failure yields a
/// serialized [`ErrorResponse`].
pub fn respond<T: Serialize>(result: Result<T, ClinicalError>) -> serde_json::Value {
    let err = match result {
        Ok(data) => match serde_json::to_value(&data) {
            Ok(value) => return json!({ "success": true, "data": value }),
            Err(e) => ClinicalError::internal(e),
        },
        Err(err) => err,
    };

    let response = ErrorResponse::from(&err);
    serde_json::to_value(&response).unwrap_or_else(|_| {
        json!({
            "success": false,
            "error": {
                "code": ErrorKind::Internal.code(),
                "message": "an unexpected error occurred",
                "recoverable": true,
                "suggestions": [],
            }
        })
    })
}
