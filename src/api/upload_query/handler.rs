// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload-and-query endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, error, warn};

use super::request::UploadQueryForm;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::dispatch::{DispatchError, QueryResponse};

/// POST /upload_and_query - Ask both vision models about an uploaded image
///
/// # Request
/// multipart/form-data with:
/// - `image`: the image file (required, non-empty)
/// - `query`: the question text (required, may be empty)
///
/// # Response
/// `{"llama1": "<answer or error>", "llama2": "<answer or error>"}`. Backend
/// failures are reported inside the body, so any upload that passes
/// validation gets a 200.
///
/// # Errors
/// - 400 Bad Request: empty file, unreadable image, malformed multipart body
/// - 413 Payload Too Large: upload exceeds the configured limit
/// - 422 Unprocessable Entity: `image` or `query` field missing
/// - 500 Internal Server Error: a backend task died unexpectedly
pub async fn upload_and_query_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QueryResponse>, ApiError> {
    let form = UploadQueryForm::from_multipart(multipart)
        .await
        .map_err(|e| {
            warn!("Upload form rejected: {}", e);
            e
        })?;

    debug!(
        "Upload received: file={:?}, {} bytes, query={} chars",
        form.file_name,
        form.image.len(),
        form.query.chars().count()
    );

    let response = state
        .dispatcher
        .handle_upload_and_query(&form.image, &form.query)
        .await
        .map_err(|e| {
            match &e {
                DispatchError::Unexpected(_) => error!("Unexpected error while querying: {}", e),
                _ => warn!("Upload validation failed: {}", e),
            }
            ApiError::from(e)
        })?;

    Ok(Json(response))
}
