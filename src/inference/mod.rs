// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote inference over an OpenAI-compatible chat-completions API
pub mod chat_client;
pub mod chat_types;
pub mod targets;

pub use chat_client::{ChatCompletionsClient, CompletionBackend, CompletionError};
pub use chat_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl};
pub use targets::{BackendTarget, BACKEND_TARGETS};
