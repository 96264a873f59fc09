//! HTTP surface of the gateway: upload page, proxy route, health/status.
//!
//! This module provides an Axum-based server with the demo upload UI and the
//! proxy endpoint that forwards images to the remote inference backend.
//!
//! # Endpoints
//!
//! - `GET /` - Single-page upload UI
//! - `POST /api/ocr` - Forward an uploaded image to the OCR backend
//!   (multipart form data, field `file`)
//! - `GET /health` - Health check endpoint
//! - `GET /status` - Gateway configuration snapshot
//!
//! CORS is intentionally permissive (any origin may POST): this is a demo
//! deployment policy, not a production security boundary.
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use textgate::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> textgate::Result<()> {
//!     serve("127.0.0.1", 7860).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use textgate::{GatewayConfig, api::create_router};
//! use axum::Router;
//!
//! let gateway = create_router(GatewayConfig::default());
//! let app = Router::new().merge(gateway);
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Process an image
//! curl -F "file=@receipt.png" http://localhost:7860/api/ocr
//!
//! # Health check
//! curl http://localhost:7860/health
//!
//! # Gateway status
//! curl http://localhost:7860/status
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::{ApiError, ErrorResponse};
pub use server::{create_router, serve, serve_default, serve_with_config};
pub use types::{ApiState, HealthResponse, MODEL_NAME, SUPPORTED_FORMATS, StatusResponse};
