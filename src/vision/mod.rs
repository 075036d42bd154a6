// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload-side image handling
//!
//! Images are only verified and re-encoded here; they are never resized or
//! transformed before being forwarded to the inference backends.

pub mod image_utils;

pub use image_utils::{
    detect_format, encode_data_uri, verify_image_bytes, ImageError, ImageInfo,
    DEFAULT_DATA_URI_MEDIA_TYPE, MAX_IMAGE_SIZE,
};
