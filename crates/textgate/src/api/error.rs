//! API error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::TextgateError;

/// Structured error payload returned by every failing API route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Extra diagnostic context, when there is any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error wrapper that renders [`TextgateError`] as an HTTP response.
///
/// Validation failures map to 400; everything else (transport failures,
/// backend rejections, unexpected errors) maps to 500. Upstream errors
/// surface the backend's own message as `error` so the browser shows what
/// the inference service actually said.
#[derive(Debug)]
pub struct ApiError(pub TextgateError);

impl From<TextgateError> for ApiError {
    fn from(err: TextgateError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String, Option<String>) {
        match &self.0 {
            TextgateError::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, message.clone(), None)
            }
            TextgateError::Upstream { status, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message.clone(),
                Some(format!("OCR backend returned HTTP {}", status)),
            ),
            TextgateError::Network { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to reach the OCR backend".to_string(),
                Some(message.clone()),
            ),
            TextgateError::Serialization { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response from the OCR backend".to_string(),
                Some(message.clone()),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string(), None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();

        // One diagnostic line per failure; nothing is retried or queued.
        if status.is_server_error() {
            tracing::error!("OCR request failed: {}", self.0);
        } else {
            tracing::debug!("OCR request rejected: {}", self.0);
        }

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
