//! Gateway configuration loading.
//!
//! Configuration comes from three layers, lowest precedence first: hardcoded
//! defaults, an optional `textgate.toml` (explicit path or discovered in the
//! current/parent directories), and environment variables. Beyond presence
//! and basic parseability nothing is validated; a demo gateway trusts its
//! operator.

use crate::{Result, TextgateError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default backend base URL when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default per-upload size ceiling in MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_max_upload_size_mb() -> usize {
    DEFAULT_MAX_UPLOAD_SIZE_MB
}

fn default_max_image_dimension() -> u32 {
    1920
}

fn default_jpeg_quality() -> u8 {
    85
}

/// Gateway configuration.
///
/// # Example
///
/// ```rust
/// use textgate::GatewayConfig;
///
/// let config = GatewayConfig::default();
/// assert_eq!(config.backend_url, "http://localhost:8000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the remote OCR inference backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Upload size ceiling in MiB. Larger files are rejected with a 400
    /// before any backend call.
    #[serde(default = "default_max_upload_size_mb")]
    pub max_upload_size_mb: usize,

    /// Re-encode uploads (bounded resize + JPEG) before forwarding.
    ///
    /// Off by default: the default path forwards the source bytes untouched.
    #[serde(default)]
    pub optimize_uploads: bool,

    /// Longest image side after optimization, in pixels.
    #[serde(default = "default_max_image_dimension")]
    pub max_image_dimension: u32,

    /// JPEG quality used when re-encoding optimized uploads.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            max_upload_size_mb: default_max_upload_size_mb(),
            optimize_uploads: false,
            max_image_dimension: default_max_image_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `TextgateError::Validation` if the file doesn't exist or is
    /// invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TextgateError::validation(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            TextgateError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })
    }

    /// Discover a configuration file in parent directories.
    ///
    /// Searches for `textgate.toml` in the current directory and its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(TextgateError::Io)?;

        loop {
            let candidate = current.join("textgate.toml");
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Overlay environment variables onto this configuration.
    ///
    /// Recognized variables:
    /// - `TEXTGATE_BACKEND_URL` - backend base URL
    /// - `TEXTGATE_MAX_UPLOAD_SIZE_MB` - upload ceiling in MiB (must be > 0)
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TEXTGATE_BACKEND_URL")
            && !url.trim().is_empty()
        {
            self.backend_url = url.trim().to_string();
        }

        if let Ok(value) = std::env::var("TEXTGATE_MAX_UPLOAD_SIZE_MB") {
            match value.parse::<usize>() {
                Ok(mb) if mb > 0 => {
                    self.max_upload_size_mb = mb;
                }
                Ok(_) => {
                    tracing::warn!("Invalid TEXTGATE_MAX_UPLOAD_SIZE_MB value (must be > 0)");
                }
                Err(_) => {
                    tracing::warn!(
                        "Failed to parse TEXTGATE_MAX_UPLOAD_SIZE_MB='{}', must be a valid usize",
                        value
                    );
                }
            }
        }
    }

    /// Load configuration with full precedence: explicit file, else
    /// discovery, else defaults; environment variables overlay the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => match Self::discover()? {
                Some(config) => {
                    tracing::info!("Loaded gateway config from discovered textgate.toml");
                    config
                }
                None => Self::default(),
            },
        };

        config.apply_env();
        Ok(config)
    }

    /// Upload size ceiling in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_size_mb * 1024 * 1024
    }
}
