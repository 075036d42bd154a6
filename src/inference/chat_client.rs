// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat-completions client for the remote vision models

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use super::chat_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::InferenceConfig;

/// Why a single completion call produced no answer
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompletionError {
    /// Connection failure, timeout, or an unreadable body
    #[error("transport failure: {0}")]
    Transport(String),

    /// The API answered with something other than 200
    #[error("API error: {status}")]
    Status { status: u16, body: String },

    /// 200 response without `choices[0].message.content`
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

/// Something that can answer one chat message with one model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, model: &str, message: &ChatMessage)
        -> Result<String, CompletionError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    /// Create a new client; the configured timeout applies to each call
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        info!(
            "Chat completions client configured: endpoint={}, timeout={:?}, max_tokens={}",
            config.api_url, config.request_timeout, config.max_tokens
        );

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionsClient {
    async fn complete(
        &self,
        model: &str,
        message: &ChatMessage,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model,
            messages: std::slice::from_ref(message),
            max_tokens: self.max_tokens,
        };

        debug!("Chat completion POST {} (model={})", self.endpoint, model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed.first_content().ok_or_else(|| {
            CompletionError::MalformedResponse("missing choices[0].message.content".to_string())
        })
    }
}
