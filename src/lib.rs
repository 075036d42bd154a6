// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod inference;
pub mod version;
pub mod vision;

pub use api::{create_app, start_server, AppState};
pub use config::{AppConfig, ConfigError, InferenceConfig};
pub use dispatch::{BackendResult, DispatchError, QueryDispatcher, QueryResponse};
pub use inference::{BackendTarget, ChatCompletionsClient, CompletionBackend, BACKEND_TARGETS};
