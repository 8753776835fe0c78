use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::DocumentError;
use crate::llm_client::json::MalformedJson;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Document contains no extractable text: {0}")]
    EmptyDocument(String),

    #[error("Unsupported file type for '{0}'. Only PDF and DOCX are supported.")]
    UnsupportedFormat(String),

    #[error("Could not read '{file}': {reason}")]
    Extraction { file: String, reason: String },

    #[error("No stored criteria available. Extract criteria first using /extract-criteria.")]
    NoCriteria,

    #[error("Malformed LLM response: {0}")]
    MalformedLlmResponse(#[from] MalformedJson),

    #[error("Expected {expected} scores, LLM returned {actual}")]
    ScoreMismatch { expected: usize, actual: usize },

    #[error("LLM provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Unsupported { file } => AppError::UnsupportedFormat(file),
            DocumentError::Empty { file } => AppError::EmptyDocument(file),
            DocumentError::Unreadable { file, reason } => AppError::Extraction { file, reason },
        }
    }
}

impl AppError {
    /// Machine-readable error kind, also used as the degraded-row reason in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmptyDocument(_) => "EMPTY_DOCUMENT",
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::Extraction { .. } => "EXTRACTION_FAILED",
            AppError::NoCriteria => "NO_CRITERIA",
            AppError::MalformedLlmResponse(_) => "MALFORMED_LLM_RESPONSE",
            AppError::ScoreMismatch { .. } => "SCORE_MISMATCH",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyDocument(_)
            | AppError::UnsupportedFormat(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoCriteria => StatusCode::CONFLICT,
            AppError::MalformedLlmResponse(_)
            | AppError::ScoreMismatch { .. }
            | AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Provider(e) => {
                tracing::error!("LLM provider error: {e}");
                "The language model provider could not be reached".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            AppError::MalformedLlmResponse(e) => {
                tracing::error!("Malformed LLM response: {e}");
                self.to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
