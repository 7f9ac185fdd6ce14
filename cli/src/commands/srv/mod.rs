//! # NutriBot Server Command (`nutribot srv`)
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! Serves the assistant over HTTP for the web frontend. The command:
//! 1. merges `--host`, `--port` and `--no-cors` over the `[server]` config section
//! 2. builds the assistant from the loaded configuration
//! 3. runs the Axum server until Ctrl+C / SIGTERM
//!
//! ## Architecture
//!
//! - **`config`**: `SrvArgs` and the merged `ServerConfig`
//! - **`routes`**: `/chat` and `/health` handlers and their shared state
//! - **`server_logic`**: port selection, middleware, static frontend, shutdown
//!
//! ## Examples
//!
//! ```bash
//! nutribot srv
//! nutribot srv --port 8080 --host 0.0.0.0
//! curl -s localhost:5000/chat -H 'content-type: application/json' \
//!      -d '{"message": "chicken rice nutrition"}'
//! ```
//!
use crate::assistant::Assistant;
use crate::core::config::Config;
use crate::core::error::Result;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

pub mod config;
pub mod routes;
pub mod server_logic;

pub async fn handle_srv(args: SrvArgs, config: &Config) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);
    let server_config = config::merge_server_config(&args, config);
    info!("Effective server config: {:?}", server_config);

    let state = routes::AppState {
        assistant: Arc::new(Assistant::from_config(config)?),
        chat_history: server_config.chat_history.clone(),
        api_configured: config.api.is_configured(),
    };
    server_logic::run_server(server_config, state).await
}
