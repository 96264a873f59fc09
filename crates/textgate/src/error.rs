//! Error types for textgate.
//!
//! All fallible operations in the gateway return [`TextgateError`]. The
//! taxonomy is deliberately flat: a request either fails validation before
//! any network call, fails in transit, or is rejected by the inference
//! backend. Every failure is terminal for that request; nothing is retried.
//!
//! - Use `thiserror` for automatic `Error` trait implementation
//! - Preserve error chains with `#[source]` attributes
//! - Include context in error messages (URLs, status codes, field names)
use thiserror::Error;

/// Result type alias using `TextgateError`.
pub type Result<T> = std::result::Result<T, TextgateError>;

/// Main error type for all gateway operations.
///
/// # Variants
///
/// - `Io` - File system and socket errors (always bubble up)
/// - `Validation` - Rejected input (missing file, wrong type, oversized)
/// - `Network` - The forwarding call to the backend failed in transit
/// - `Upstream` - The backend answered with a non-2xx status
/// - `ImageProcessing` - Image decode/re-encode failures
/// - `Serialization` - JSON encoding/decoding errors
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum TextgateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR backend error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Image processing error: {message}")]
    ImageProcessing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for TextgateError {
    fn from(err: serde_json::Error) -> Self {
        TextgateError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for TextgateError {
    fn from(err: reqwest::Error) -> Self {
        TextgateError::Network {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl TextgateError {
    /// Create a Validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Upstream error from a backend status and message
    pub fn upstream<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create an ImageProcessing error
    pub fn image_processing<S: Into<String>>(message: S) -> Self {
        Self::ImageProcessing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }

    /// The message a user should see for this error.
    ///
    /// Upstream errors surface the backend's own message verbatim; everything
    /// else uses the display form.
    pub fn user_message(&self) -> String {
        match self {
            TextgateError::Upstream { message, .. } => message.clone(),
            TextgateError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
