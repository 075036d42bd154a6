// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::upload_query::upload_and_query_handler;
use crate::config::AppConfig;
use crate::dispatch::QueryDispatcher;

/// Room for multipart boundaries, headers and the query field on top of the image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<QueryDispatcher>,
}

impl AppState {
    pub fn new(dispatcher: QueryDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub targets: Vec<String>,
}

/// Build the router with all routes and layers
pub fn create_app(state: AppState) -> Router {
    let body_limit = state
        .dispatcher
        .max_image_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/upload_and_query", post(upload_and_query_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn start_server(config: AppConfig) -> Result<()> {
    let dispatcher = QueryDispatcher::from_config(&config)?;
    let app = create_app(AppState::new(dispatcher));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION.to_string(),
        targets: state
            .dispatcher
            .targets()
            .iter()
            .map(|t| t.id.to_string())
            .collect(),
    })
}
