// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart form for POST /upload_and_query

use axum::http::StatusCode;
use axum_extra::extract::{multipart::MultipartError, Multipart};
use tracing::debug;

use crate::api::errors::ApiError;

/// Form field carrying the image file
pub const IMAGE_FIELD: &str = "image";

/// Form field carrying the question text
pub const QUERY_FIELD: &str = "query";

/// Fields pulled out of an upload form
#[derive(Debug, Clone)]
pub struct UploadQueryForm {
    /// Raw image bytes, possibly empty
    pub image: Vec<u8>,
    /// Client-supplied file name, if any
    pub file_name: Option<String>,
    /// Question text; an empty string still counts as present
    pub query: String,
}

impl UploadQueryForm {
    /// Read the `image` and `query` fields, ignoring anything else
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut image: Option<Vec<u8>> = None;
        let mut file_name: Option<String> = None;
        let mut query: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().map(|n| n.to_string());
            match field_name.as_deref() {
                Some(IMAGE_FIELD) => {
                    file_name = field.file_name().map(|n| n.to_string());
                    image = Some(field.bytes().await.map_err(multipart_error)?.to_vec());
                }
                Some(QUERY_FIELD) => {
                    query = Some(field.text().await.map_err(multipart_error)?);
                }
                other => debug!("Ignoring unexpected form field {:?}", other),
            }
        }

        Ok(Self {
            image: image.ok_or_else(|| ApiError::MissingField(IMAGE_FIELD.to_string()))?,
            file_name,
            query: query.ok_or_else(|| ApiError::MissingField(QUERY_FIELD.to_string()))?,
        })
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::InvalidRequest(format!("Multipart error: {}", err.body_text()))
    }
}
