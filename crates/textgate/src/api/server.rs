//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::{GatewayConfig, Result, TextgateError};

use super::handlers::{health_handler, index_handler, ocr_handler, status_handler};
use super::types::ApiState;

/// Headroom added to the transport-level body limit so an upload just over
/// the field ceiling still reaches the handler and gets the structured 400
/// instead of a bare 413 from the body-limit layer.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the gateway router with all routes configured.
///
/// This is public to allow embedding the router in another application.
///
/// # Examples
///
/// ```no_run
/// use textgate::{GatewayConfig, api::create_router};
///
/// let router = create_router(GatewayConfig::default());
/// ```
pub fn create_router(config: GatewayConfig) -> Router {
    let body_limit = config.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;
    let state = ApiState::new(config);

    // Demo policy: any origin may POST. Do not put this in front of anything
    // that is not a demo deployment.
    tracing::warn!(
        "CORS configured to allow all origins. This is a demo policy, not a production security boundary."
    );
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/ocr", post(ocr_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway with config discovery.
///
/// Searches for `textgate.toml` in the current and parent directories, then
/// overlays environment variables. Defaults apply when nothing is found.
///
/// # Examples
///
/// ```no_run
/// use textgate::api::serve;
///
/// #[tokio::main]
/// async fn main() -> textgate::Result<()> {
///     serve("127.0.0.1", 7860).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = GatewayConfig::load(None)?;
    serve_with_config(host, port, config).await
}

/// Start the gateway with an explicit config.
///
/// # Arguments
///
/// * `host` - IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// * `port` - Port number to bind to (e.g., 7860)
/// * `config` - Gateway configuration
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: GatewayConfig) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| TextgateError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);

    tracing::info!(
        "Forwarding uploads to {} (ceiling {} MB)",
        config.backend_url,
        config.max_upload_size_mb
    );

    let app = create_router(config);

    tracing::info!("Starting textgate gateway on http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(TextgateError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| TextgateError::Other(e.to_string()))?;

    Ok(())
}

/// Start the gateway with default host and port.
///
/// Defaults: host = "127.0.0.1", port = 7860.
pub async fn serve_default() -> Result<()> {
    serve("127.0.0.1", 7860).await
}
