// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Startup configuration
//!
//! Built once in `main` from CLI flags and environment (a `.env` file is
//! honoured) and handed to the components that need it. Nothing here is
//! mutated after startup.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::cli::NodeArgs;

/// Chat-completions endpoint used when none is configured
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing GROQ_API_KEY: set it in the environment, a .env file, or pass --api-key")]
    MissingApiKey,

    #[error("Invalid API URL '{0}': {1}")]
    InvalidApiUrl(String, String),

    #[error("Invalid listen address '{0}': {1}")]
    InvalidListenAddr(String, String),

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Settings for the outbound chat-completions client
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub api_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub inference: InferenceConfig,
    pub max_upload_bytes: usize,
    pub label_detected_media_type: bool,
}

impl AppConfig {
    /// Validate parsed arguments into a usable configuration
    pub fn from_args(args: NodeArgs) -> Result<Self, ConfigError> {
        let api_key = args
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        url::Url::parse(&args.api_url)
            .map_err(|e| ConfigError::InvalidApiUrl(args.api_url.clone(), e.to_string()))?;

        let listen_addr: SocketAddr = args
            .listen_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidListenAddr(args.listen_addr.clone(), e.to_string())
            })?;

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            listen_addr,
            inference: InferenceConfig {
                api_url: args.api_url,
                api_key,
                request_timeout: Duration::from_secs(args.request_timeout_secs),
                max_tokens: args.max_tokens,
            },
            max_upload_bytes: args.max_upload_bytes,
            label_detected_media_type: args.label_detected_media_type,
        })
    }
}
