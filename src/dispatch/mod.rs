// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query dispatcher: one image and one question in, one answer per target out
//!
//! Validation failures are the only request-level errors. Each target's call
//! is isolated: a timeout, bad status or malformed body on one target turns
//! into an error string under that target's key and leaves the other
//! target's answer untouched.

pub mod result;

pub use result::{BackendResult, DispatchError, QueryResponse};

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::inference::{
    BackendTarget, ChatCompletionsClient, ChatMessage, CompletionBackend, BACKEND_TARGETS,
};
use crate::vision::{encode_data_uri, verify_image_bytes, DEFAULT_DATA_URI_MEDIA_TYPE, MAX_IMAGE_SIZE};

/// Characters of each answer echoed to the log
const ANSWER_PREVIEW_CHARS: usize = 100;

pub struct QueryDispatcher {
    backend: Arc<dyn CompletionBackend>,
    targets: Vec<BackendTarget>,
    max_image_bytes: usize,
    label_detected_media_type: bool,
}

impl QueryDispatcher {
    /// Dispatcher over the fixed targets with default limits
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            targets: BACKEND_TARGETS.to_vec(),
            max_image_bytes: MAX_IMAGE_SIZE,
            label_detected_media_type: false,
        }
    }

    /// Dispatcher talking to the configured chat-completions endpoint
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = ChatCompletionsClient::new(&config.inference)?;
        Ok(Self::new(Arc::new(client))
            .with_max_image_bytes(config.max_upload_bytes)
            .with_detected_media_type(config.label_detected_media_type))
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Label data URIs with the sniffed media type rather than `image/jpeg`
    pub fn with_detected_media_type(mut self, enabled: bool) -> Self {
        self.label_detected_media_type = enabled;
        self
    }

    pub fn targets(&self) -> &[BackendTarget] {
        &self.targets
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// Validate the upload, ask every target, and collect their answers.
    ///
    /// Targets are queried concurrently, one task each. The returned
    /// response always holds one entry per target, in target order.
    ///
    /// # Errors
    /// * `EmptyFile` / `InvalidImage` / `TooLarge` - the upload was rejected
    ///   and no backend was called
    /// * `Unexpected` - a backend task died without producing an outcome
    pub async fn handle_upload_and_query(
        &self,
        image: &[u8],
        query: &str,
    ) -> Result<QueryResponse, DispatchError> {
        let info = verify_image_bytes(image, self.max_image_bytes).map_err(|e| {
            warn!("Rejected upload: {}", e);
            DispatchError::from(e)
        })?;

        debug!(
            "Verified {:?} image: {}x{}, {} bytes",
            info.format, info.width, info.height, info.size_bytes
        );

        let media_type = if self.label_detected_media_type {
            info.media_type()
        } else {
            DEFAULT_DATA_URI_MEDIA_TYPE
        };
        let message = Arc::new(ChatMessage::user_with_image(
            query,
            encode_data_uri(image, media_type),
        ));

        let handles: Vec<_> = self
            .targets
            .iter()
            .map(|&target| {
                let backend = Arc::clone(&self.backend);
                let message = Arc::clone(&message);
                tokio::spawn(async move {
                    let outcome = backend.complete(target.model, &message).await;
                    match &outcome {
                        Ok(answer) => info!(
                            "Processed response from {}: {}...",
                            target.id,
                            preview(answer, ANSWER_PREVIEW_CHARS)
                        ),
                        Err(e) => error!("Request to {} ({}) failed: {:?}", target.id, target.model, e),
                    }
                    BackendResult::from_completion(&target, outcome)
                })
            })
            .collect();

        let mut response = QueryResponse::default();
        for (target, handle) in self.targets.iter().zip(handles) {
            let result = handle.await.map_err(|e| {
                error!("Backend task for {} did not finish: {}", target.id, e);
                DispatchError::Unexpected(e.to_string())
            })?;
            response.insert(target.id, result);
        }

        Ok(response)
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
