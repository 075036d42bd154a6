// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image verification and data-URI encoding for uploaded images

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use thiserror::Error;

/// Default upload ceiling (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Media type written into outbound data URIs unless the detected one is requested
pub const DEFAULT_DATA_URI_MEDIA_TYPE: &str = "image/jpeg";

/// Errors raised while verifying uploaded image bytes
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Image data is empty")]
    EmptyData,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Corrupted image data: {0}")]
    CorruptedData(String),
}

/// What verification learned about an image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

impl ImageInfo {
    /// MIME type matching the detected format
    pub fn media_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Verify that `bytes` hold a readable raster image.
///
/// Sniffs the format from the leading bytes, then decodes the image so that
/// a plausible header followed by garbage is rejected. The decoded pixels
/// are dropped; the original bytes are what get forwarded.
///
/// # Arguments
/// * `bytes` - Raw uploaded bytes
/// * `max_size` - Largest accepted payload in bytes
///
/// # Returns
/// * `Ok(ImageInfo)` - Format, dimensions and size of the image
/// * `Err(ImageError)` - If the payload is empty, oversized, or not an image
pub fn verify_image_bytes(bytes: &[u8], max_size: usize) -> Result<ImageInfo, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    if bytes.len() > max_size {
        return Err(ImageError::TooLarge(bytes.len(), max_size));
    }

    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::CorruptedData(e.to_string()))?;
    let (width, height) = (img.width(), img.height());

    Ok(ImageInfo {
        width,
        height,
        format,
        size_bytes: bytes.len(),
    })
}

/// Detect image format from magic bytes
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    image::guess_format(bytes).map_err(|_| ImageError::UnsupportedFormat)
}

/// Base64-encode `bytes` into a `data:` URI labelled with `media_type`
pub fn encode_data_uri(bytes: &[u8], media_type: &str) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}
