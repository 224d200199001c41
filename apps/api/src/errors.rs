use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ManualExtractionGuidance;
use crate::models::Notice;

/// Generic text shown for any matcher failure. Upstream detail is logged, never returned.
pub const MATCH_FAILURE_MESSAGE: &str = "Failed to match jobs. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Matcher error: {0}")]
    Matcher(String),

    #[error("PDF text extraction requires manual input")]
    ManualExtraction(Box<ManualExtractionGuidance>),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    /// Any of the above, plus a notice for the user. Rendered as the wrapped
    /// error's body with a `notice` object alongside.
    #[error("{error}")]
    Notified { error: Box<AppError>, notice: Notice },
}

impl AppError {
    pub fn with_notice(self, notice: Notice) -> Self {
        AppError::Notified {
            error: Box::new(self),
            notice,
        }
    }

    /// Status, code and message for the `{error:{code,message}}` envelope.
    /// Variants with their own flat body come back as a finished response.
    fn envelope(self) -> Result<(StatusCode, &'static str, String), Response> {
        let parts = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::UnsupportedMediaType(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_MEDIA_TYPE", msg)
            }
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg)
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            AppError::Matcher(msg) => {
                tracing::error!("Matcher error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MATCHER_ERROR",
                    MATCH_FAILURE_MESSAGE.to_string(),
                )
            }
            // The extraction stub answers with its own flat payload rather than the envelope.
            AppError::ManualExtraction(guidance) => {
                return Err((StatusCode::UNPROCESSABLE_ENTITY, Json(*guidance)).into_response());
            }
            AppError::ExtractionFailed(details) => {
                tracing::error!("Extraction request failed: {details}");
                let body = Json(json!({
                    "error": "Failed to process request",
                    "details": details,
                }));
                return Err((StatusCode::INTERNAL_SERVER_ERROR, body).into_response());
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Notified { error, .. } => return error.envelope(),
        };
        Ok(parts)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error, notice) = match self {
            AppError::Notified { error, notice } => (*error, Some(notice)),
            other => (other, None),
        };

        let (status, code, message) = match error.envelope() {
            Ok(parts) => parts,
            Err(flat) => return flat,
        };

        let mut body = json!({
            "error": {
                "code": code,
                "message": message
            }
        });
        if let Some(notice) = notice {
            body["notice"] = serde_json::to_value(notice).unwrap_or_default();
        }

        (status, Json(body)).into_response()
    }
}
