//! API state and auxiliary response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{GatewayConfig, OcrClient};

/// Display name of the model behind the default backend deployment.
pub const MODEL_NAME: &str = "dots.ocr (GOT-OCR2_0)";

/// Image formats the default backend accepts.
pub const SUPPORTED_FORMATS: &[&str] = &["PNG", "JPEG", "GIF", "BMP", "WebP"];

/// API server state.
///
/// Immutable after startup and shared across requests; no cross-request
/// mutable state exists anywhere in the gateway.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// Gateway configuration loaded at startup.
    pub config: Arc<GatewayConfig>,
    /// Forwarding client for the inference backend.
    pub client: OcrClient,
}

impl ApiState {
    pub fn new(config: GatewayConfig) -> Self {
        let client = OcrClient::new(&config.backend_url);
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Gateway version
    pub version: String,
}

/// Gateway status response: a configuration snapshot for operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always "running" while the process answers.
    pub api_status: String,
    /// Configured inference backend base URL.
    pub backend_url: String,
    /// Model behind the backend deployment.
    pub model: String,
    /// Upload size ceiling in MiB.
    pub max_upload_size_mb: usize,
    /// Whether uploads are re-encoded before forwarding.
    pub optimize_uploads: bool,
    /// Accepted image formats.
    pub supported_formats: Vec<String>,
}
