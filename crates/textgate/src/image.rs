//! Pre-forward image optimization.
//!
//! Recreates the upstream gateway's memory-saving transform: bound the image
//! dimensions, normalize to RGB, and re-encode as JPEG before forwarding.
//! Disabled by default (`optimize_uploads = false`) so the default path
//! forwards the source bytes byte-for-byte.

use crate::error::{Result, TextgateError};
use image::ImageReader;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;

/// Re-encode an image so neither side exceeds `max_dimension`.
///
/// Aspect ratio is preserved; output is always RGB JPEG at `jpeg_quality`.
/// Input that cannot be recognized or decoded as an image passes through
/// unchanged, matching the behavior of the original gateway: optimization is
/// best-effort, never a gatekeeper.
pub fn optimize_image(bytes: &[u8], max_dimension: u32, jpeg_quality: u8) -> Result<Vec<u8>> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(TextgateError::Io)?;

    if reader.format().is_none() {
        tracing::debug!("Upload format not recognized, forwarding original bytes");
        return Ok(bytes.to_vec());
    }

    let image = match reader.decode() {
        Ok(image) => image,
        Err(e) => {
            tracing::debug!("Upload failed to decode ({}), forwarding original bytes", e);
            return Ok(bytes.to_vec());
        }
    };

    let (width, height) = (image.width(), image.height());
    let image = if width > max_dimension || height > max_dimension {
        let resized = image.thumbnail(max_dimension, max_dimension);
        tracing::debug!(
            "Resized upload from {}x{} to {}x{}",
            width,
            height,
            resized.width(),
            resized.height()
        );
        resized
    } else {
        image
    };

    let rgb = image.to_rgb8();
    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, jpeg_quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| TextgateError::image_processing(format!("Failed to re-encode image: {}", e)))?;

    Ok(out.into_inner())
}
