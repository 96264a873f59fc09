//! API request handlers.

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;

use crate::TextgateError;
use crate::types::OcrResult;

use super::error::ApiError;
use super::types::{ApiState, HealthResponse, MODEL_NAME, SUPPORTED_FORMATS, StatusResponse};

/// The embedded upload page.
const INDEX_HTML: &str = include_str!("index.html");

/// Resolve the effective MIME type of an upload.
///
/// The browser's declared type wins when it carries one; otherwise the magic
/// bytes are sniffed. Returns `None` unless the effective type is `image/*`.
fn effective_content_type(declared: Option<&str>, data: &[u8]) -> Option<String> {
    let resolved = match declared {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_string(),
        _ => infer::get(data).map(|kind| kind.mime_type().to_string())?,
    };

    resolved.starts_with("image/").then_some(resolved)
}

/// Upload page handler.
///
/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// OCR proxy endpoint handler.
///
/// POST /api/ocr
///
/// Accepts multipart form data with one field:
/// - `file`: the image to process (`image/*`, at most the configured ceiling)
///
/// Validation failures (missing field, oversize, wrong type) return 400
/// before any backend call. On acceptance the upload is forwarded to the
/// configured backend exactly once and the backend's JSON is normalized to
/// the fixed [`OcrResult`] shape. Each request is independent and stateless;
/// repeated identical uploads produce independent forwarded calls.
pub async fn ocr_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<OcrResult>, ApiError> {
    let mut upload: Option<(Vec<u8>, Option<String>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from(TextgateError::validation(e.to_string())))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().map(|s| s.to_string());
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::from(TextgateError::validation(e.to_string())))?;

                upload = Some((data.to_vec(), file_name, content_type));
            }
            _ => {}
        }
    }

    let Some((data, file_name, declared_type)) = upload else {
        return Err(TextgateError::validation(
            "No file provided. Upload an image in the 'file' field.",
        )
        .into());
    };

    if data.len() > state.config.max_upload_bytes() {
        return Err(TextgateError::validation(format!(
            "File size exceeds the {} MB limit",
            state.config.max_upload_size_mb
        ))
        .into());
    }

    let mut content_type =
        effective_content_type(declared_type.as_deref(), &data).ok_or_else(|| {
            TextgateError::validation("Please select an image file (content type must be image/*)")
        })?;

    tracing::info!(
        "Processing upload '{}': {} bytes ({})",
        file_name.as_deref().unwrap_or("unnamed"),
        data.len(),
        content_type
    );

    let data = if state.config.optimize_uploads {
        let optimized = crate::image::optimize_image(
            &data,
            state.config.max_image_dimension,
            state.config.jpeg_quality,
        )?;
        // Re-sniff: the transform normally re-encodes to JPEG, but
        // undecodable input passes through with its original type.
        if let Some(kind) = infer::get(&optimized) {
            content_type = kind.mime_type().to_string();
        }
        optimized
    } else {
        data
    };

    let result = state.client.process(data, file_name, &content_type).await?;
    Ok(Json(result))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Gateway status endpoint handler.
///
/// GET /status
pub async fn status_handler(State(state): State<ApiState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        api_status: "running".to_string(),
        backend_url: state.config.backend_url.clone(),
        model: MODEL_NAME.to_string(),
        max_upload_size_mb: state.config.max_upload_size_mb,
        optimize_uploads: state.config.optimize_uploads,
        supported_formats: SUPPORTED_FORMATS.iter().map(|s| s.to_string()).collect(),
    })
}
