//! Forwarding client for the remote OCR inference backend.
//!
//! The gateway never interprets image content itself; it re-packages the
//! upload into a fresh multipart body and performs exactly one HTTP call to
//! the configured backend. There is no retry loop and no explicit timeout:
//! a request runs to completion or failure, and the caller re-triggers
//! manually.

use crate::error::{Result, TextgateError};
use crate::types::{BackendErrorBody, BackendOcrResponse, OcrResult};
use reqwest::multipart::{Form, Part};

/// Path of the process endpoint on the inference backend.
const PROCESS_PATH: &str = "/api/v1/ocr/process";

/// Fallback filename when the browser did not send one.
const DEFAULT_FILE_NAME: &str = "upload";

/// HTTP client for one OCR inference backend.
///
/// Cloning is cheap; the inner `reqwest::Client` is shared.
///
/// # Example
///
/// ```no_run
/// use textgate::OcrClient;
///
/// # #[tokio::main]
/// # async fn main() -> textgate::Result<()> {
/// let client = OcrClient::new("http://localhost:8000");
/// let result = client.process(vec![0u8; 16], None, "image/png").await?;
/// println!("{}", result.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
}

impl OcrClient {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Full URL of the backend process endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PROCESS_PATH)
    }

    /// Forward one image upload to the backend and normalize the response.
    ///
    /// Performs a single multipart POST. A transport failure maps to
    /// `Network`; a non-2xx answer maps to `Upstream` carrying the backend's
    /// own `error`/`detail` message when its body is JSON-parseable.
    pub async fn process(
        &self,
        data: Vec<u8>,
        file_name: Option<String>,
        content_type: &str,
    ) -> Result<OcrResult> {
        let url = self.endpoint();
        let size = data.len();

        let part = Part::bytes(data)
            .file_name(file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()))
            .mime_str(content_type)
            .map_err(|e| {
                TextgateError::validation(format!("Invalid content type '{}': {}", content_type, e))
            })?;
        let form = Form::new().part("file", part);

        tracing::debug!("Forwarding {} byte upload to {}", size, url);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                TextgateError::network_with_source(format!("OCR backend request failed: {}", e), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = BackendErrorBody::extract(&body).unwrap_or_else(|| {
                format!("OCR backend returned HTTP {}", status.as_u16())
            });
            return Err(TextgateError::upstream(status.as_u16(), message));
        }

        let backend: BackendOcrResponse = response.json().await.map_err(|e| {
            TextgateError::serialization(format!("Failed to parse OCR backend response: {}", e))
        })?;

        Ok(backend.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Multipart, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Captured = Arc<Mutex<Option<(Vec<u8>, String)>>>;

    async fn capture_handler(
        State(captured): State<Captured>,
        mut multipart: Multipart,
    ) -> Json<Value> {
        while let Some(field) = multipart.next_field().await.expect("multipart field") {
            if field.name() == Some("file") {
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field.bytes().await.expect("field bytes").to_vec();
                *captured.lock().expect("captured lock") = Some((data, content_type));
            }
        }
        Json(json!({ "text": "captured" }))
    }

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OcrClient::new("http://localhost:8000/");
        assert_eq!(client.endpoint(), "http://localhost:8000/api/v1/ocr/process");
    }

    #[tokio::test]
    async fn test_process_normalizes_success_response() {
        let router = Router::new().route(
            "/api/v1/ocr/process",
            post(|| async { Json(json!({ "text": "hello", "confidence": 0.87 })) }),
        );
        let base_url = spawn_backend(router).await;

        let client = OcrClient::new(base_url);
        let result = client
            .process(b"fake image".to_vec(), None, "image/png")
            .await
            .expect("process succeeds");

        assert_eq!(result.text, "hello");
        assert_eq!(result.confidence, Some(0.87));
        assert_eq!(result.layout, None);
        assert_eq!(result.processing_time, None);
        assert_eq!(result.model_used, None);
    }

    #[tokio::test]
    async fn test_process_forwards_exact_bytes_and_content_type() {
        let captured: Captured = Arc::new(Mutex::new(None));
        let router = Router::new()
            .route("/api/v1/ocr/process", post(capture_handler))
            .with_state(captured.clone());
        let base_url = spawn_backend(router).await;

        let source: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let client = OcrClient::new(base_url);
        client
            .process(source.clone(), Some("scan.png".to_string()), "image/png")
            .await
            .expect("process succeeds");

        let (bytes, content_type) = captured
            .lock()
            .expect("captured lock")
            .take()
            .expect("backend saw the file field");
        assert_eq!(bytes, source);
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn test_process_surfaces_backend_error_message() {
        let router = Router::new().route(
            "/api/v1/ocr/process",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "GPU busy" })),
                )
            }),
        );
        let base_url = spawn_backend(router).await;

        let client = OcrClient::new(base_url);
        let err = client
            .process(b"img".to_vec(), None, "image/jpeg")
            .await
            .expect_err("backend error propagates");

        match err {
            TextgateError::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "GPU busy");
            }
            other => panic!("expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_process_surfaces_fastapi_detail_message() {
        let router = Router::new().route(
            "/api/v1/ocr/process",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "detail": "model not loaded" })),
                )
            }),
        );
        let base_url = spawn_backend(router).await;

        let client = OcrClient::new(base_url);
        let err = client
            .process(b"img".to_vec(), None, "image/jpeg")
            .await
            .expect_err("backend error propagates");

        assert_eq!(err.user_message(), "model not loaded");
    }

    #[tokio::test]
    async fn test_process_generic_message_for_unparseable_error_body() {
        let router = Router::new().route(
            "/api/v1/ocr/process",
            post(|| async { (StatusCode::BAD_GATEWAY, "<html>oops</html>") }),
        );
        let base_url = spawn_backend(router).await;

        let client = OcrClient::new(base_url);
        let err = client
            .process(b"img".to_vec(), None, "image/jpeg")
            .await
            .expect_err("backend error propagates");

        assert_eq!(err.user_message(), "OCR backend returned HTTP 502");
    }

    #[tokio::test]
    async fn test_process_maps_transport_failure_to_network_error() {
        // Nothing listens here; the connect fails immediately.
        let client = OcrClient::new("http://127.0.0.1:1");
        let err = client
            .process(b"img".to_vec(), None, "image/png")
            .await
            .expect_err("connect fails");

        assert!(matches!(err, TextgateError::Network { .. }));
    }

    #[tokio::test]
    async fn test_process_rejects_malformed_success_body() {
        let router = Router::new().route("/api/v1/ocr/process", post(|| async { "not json" }));
        let base_url = spawn_backend(router).await;

        let client = OcrClient::new(base_url);
        let err = client
            .process(b"img".to_vec(), None, "image/png")
            .await
            .expect_err("parse fails");

        assert!(matches!(err, TextgateError::Serialization { .. }));
    }
}
