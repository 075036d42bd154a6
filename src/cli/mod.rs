// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;

use crate::config::DEFAULT_API_URL;

/// Vision Query Node: ask two vision models about one uploaded image
#[derive(Parser, Debug, Clone)]
#[command(name = "vision-query-node")]
#[command(version)]
#[command(about = "Upload an image with a question and collect answers from two vision models", long_about = None)]
pub struct NodeArgs {
    /// API key for the chat-completions endpoint
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint URL
    #[arg(long, env = "GROQ_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,

    /// Timeout applied to each backend call, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// max_tokens sent with every completion request
    #[arg(long, env = "MAX_TOKENS", default_value_t = 1000)]
    pub max_tokens: u32,

    /// Largest accepted image upload, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Label outbound data URIs with the detected media type instead of image/jpeg
    #[arg(long, env = "LABEL_DETECTED_MEDIA_TYPE")]
    pub label_detected_media_type: bool,
}
