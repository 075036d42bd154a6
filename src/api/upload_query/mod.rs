// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload-and-query API endpoint module
//!
//! Provides POST /upload_and_query: one image, one question, two answers.

pub mod handler;
pub mod request;

pub use handler::upload_and_query_handler;
pub use request::{UploadQueryForm, IMAGE_FIELD, QUERY_FIELD};
