//! Request and response types shared by the client and the API surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized OCR result returned by the gateway.
///
/// This is the one entity that crosses the browser/gateway/backend boundary.
/// It is a one-shot value object: constructed from the backend response,
/// held in memory for the duration of a request, never persisted.
///
/// Optional fields serialize as explicit `null` rather than being omitted,
/// so clients always see the full key set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Extracted text content. Required, may be empty.
    pub text: String,
    /// Recognition confidence in [0, 1], when the backend reports one.
    pub confidence: Option<f64>,
    /// Detected region layout. Opaque: passed through verbatim, never
    /// interpreted by the gateway.
    pub layout: Option<Value>,
    /// Backend-side processing time in seconds.
    pub processing_time: Option<f64>,
    /// Identifier of the model that produced the result.
    pub model_used: Option<String>,
}

/// Raw response shape of the inference backend.
///
/// Deserialization is lenient: every field defaults when absent and unknown
/// keys are ignored, so backend additions never break the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendOcrResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub layout: Option<Value>,
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub model_used: Option<String>,
}

impl From<BackendOcrResponse> for OcrResult {
    fn from(response: BackendOcrResponse) -> Self {
        Self {
            text: response.text,
            confidence: response.confidence,
            layout: response.layout,
            processing_time: response.processing_time,
            model_used: response.model_used,
        }
    }
}

/// Error body shape of backend non-2xx responses.
///
/// The dots.ocr backend reports failures as `{"error": ...}`; FastAPI-style
/// deployments use `{"detail": ...}`. Both are accepted.
#[derive(Debug, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl BackendErrorBody {
    /// Extract a human-readable message from a backend error body.
    ///
    /// Returns `None` when the body is not JSON or carries no usable message,
    /// in which case the caller falls back to a generic string.
    pub fn extract(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|parsed| parsed.error.or(parsed.detail))
            .filter(|message| !message.is_empty())
    }
}
