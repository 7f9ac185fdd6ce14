//! # NutriBot HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! Runs the chat API for `nutribot srv`:
//! - JSON routes from `routes` (`/chat`, `/health`)
//! - the static frontend as a fallback service, when a frontend directory exists
//! - port availability checking with automatic fallback
//! - CORS and request tracing middleware
//! - graceful shutdown on Ctrl+C / SIGTERM
//!
//! ## Architecture
//!
//! 1. Find an available port, starting at the configured one
//! 2. Build the Axum router with its middleware
//! 3. Print connection information
//! 4. Serve until a shutdown signal arrives
//!
use super::config::ServerConfig;
use super::routes::{api_router, AppState};
use crate::core::error::Result;
use anyhow::Context;
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

pub async fn run_server(config: ServerConfig, state: AppState) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let api_configured = state.api_configured;
    let app = create_app(&config, state);

    println!("\n=================================================================");
    println!("🥗 NutriBot: Singapore Nutrition Assistant");
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("⚙️  Binding to address: {}", addr);
    match &config.frontend_dir {
        Some(dir) => println!("📂 Frontend:          {}", dir.display()),
        None => println!("📂 Frontend:          (none, API only)"),
    }
    println!("💾 Chat history:      {}", config.chat_history.display());
    println!(
        "🔑 USDA API key:      {}",
        if api_configured { "configured" } else { "not configured (using DEMO_KEY)" }
    );
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("=================================================================\n");

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Returns the first bindable address at `start_port` or one of the ports after it.
async fn find_available_port(
    req_host: IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;
    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }
    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// API routes, optional static frontend, tracing and CORS.
fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut app = api_router(state);
    if let Some(dir) = &config.frontend_dir {
        info!("Serving frontend from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}
