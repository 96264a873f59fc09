//! Textgate - OCR Upload Gateway
//!
//! Textgate is a demonstration web gateway for remote OCR inference. It
//! serves a single-page upload UI and a proxy route that forwards image
//! uploads to a dots.ocr (GOT-OCR2_0) backend over HTTP, normalizing the
//! backend's JSON into a fixed result shape.
//!
//! The gateway performs no OCR itself: the model is an external collaborator
//! reached through [`OcrClient`]. Every request is independent, stateless,
//! and runs as a single awaited call with no retries.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use textgate::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> textgate::Result<()> {
//!     // Serves the upload UI and proxy route on http://127.0.0.1:7860
//!     serve("127.0.0.1", 7860).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **`api`**: Axum router, handlers, and the embedded upload page
//! - **`client`**: forwarding client for the inference backend
//! - **`config`**: TOML + environment configuration with hardcoded fallbacks
//! - **`image`**: optional pre-forward optimization (bounded resize + JPEG)

#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod types;

pub use client::OcrClient;
pub use config::{DEFAULT_BACKEND_URL, DEFAULT_MAX_UPLOAD_SIZE_MB, GatewayConfig};
pub use error::{Result, TextgateError};
pub use image::optimize_image;
pub use types::{BackendErrorBody, BackendOcrResponse, OcrResult};
