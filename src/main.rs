// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::env;
use tracing::info;
use vision_query_node::{
    api::start_server, cli::NodeArgs, config::AppConfig, inference::BACKEND_TARGETS, version,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = NodeArgs::parse();
    let config = match AppConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting {} {}", version::NAME, version::VERSION);
    info!("Chat completions endpoint: {}", config.inference.api_url);
    for target in BACKEND_TARGETS.iter() {
        info!("Backend target {} -> {}", target.id, target.model);
    }

    start_server(config).await
}
