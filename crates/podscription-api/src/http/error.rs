//! Application error type mapping to HTTP status codes and error bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use podscription_types::error::{ConsultationError, ErrorKind};

use crate::http::response::ErrorBody;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Failure reported by the consultation service.
    Consultation(ConsultationError),
    /// Request body was not valid JSON for the endpoint.
    InvalidPayload(String),
    /// Path parameter was not a UUID.
    InvalidSessionId(String),
    /// Sessions could not be listed.
    ListingFailed(String),
}

impl From<ConsultationError> for AppError {
    fn from(e: ConsultationError) -> Self {
        AppError::Consultation(e)
    }
}

impl AppError {
    /// HTTP status, machine-readable code and message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Consultation(e) => {
                let kind = e.kind();
                let status = match kind {
                    ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
                    ErrorKind::SessionNotFound => StatusCode::NOT_FOUND,
                    ErrorKind::SessionCreationFailed
                    | ErrorKind::ProcessingFailed
                    | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, kind.code(), e.to_string())
            }
            AppError::InvalidPayload(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PAYLOAD",
                "Invalid request payload".to_string(),
            ),
            AppError::InvalidSessionId(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_SESSION_ID",
                "Invalid session ID format".to_string(),
            ),
            AppError::ListingFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "LISTING_FAILED",
                format!("Failed to list sessions: {msg}"),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        match &self {
            AppError::InvalidPayload(detail) | AppError::InvalidSessionId(detail) => {
                tracing::warn!(error_code = code, detail = %detail, "{message}");
            }
            _ => tracing::error!(error_code = code, status = status.as_u16(), "{message}"),
        }

        let body = ErrorBody {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
