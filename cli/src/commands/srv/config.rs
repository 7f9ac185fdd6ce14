//! # NutriBot Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! Defines the `srv` command line and merges it over the `[server]` section
//! of `nutribot.toml`. Precedence is simple: a flag given on the command line
//! wins, otherwise the config file value (or its default) is used.
//!
//! | Setting        | Flag        | Config key              | Default      |
//! |----------------|-------------|-------------------------|--------------|
//! | Bind host      | `--host`    | `server.host`           | `127.0.0.1`  |
//! | Port           | `--port`    | `server.port`           | `5000`       |
//! | CORS           | `--no-cors` | `server.enable_cors`    | enabled      |
//! | Frontend files | (none)      | `server.frontend_dir`   | `frontend`   |
//!
use crate::core::config::Config;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::debug;

/// Arguments for `nutribot srv`.
#[derive(Parser, Debug, Default)]
pub struct SrvArgs {
    /// Address to bind (overrides `server.host`).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides `server.port`). The next free port is
    /// used if it is taken.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Disable the permissive CORS layer.
    #[arg(long)]
    pub no_cors: bool,
}

/// Effective server settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
    /// Static frontend root, `None` when the directory does not exist.
    pub frontend_dir: Option<PathBuf>,
    pub chat_history: PathBuf,
}

pub fn merge_server_config(args: &SrvArgs, config: &Config) -> ServerConfig {
    let settings = &config.server;
    let frontend_dir = Some(settings.frontend_dir.clone()).filter(|dir| dir.is_dir());
    if frontend_dir.is_none() {
        debug!(
            "Frontend directory {} not found; serving the API only.",
            settings.frontend_dir.display()
        );
    }
    ServerConfig {
        host: args.host.unwrap_or(settings.host),
        port: args.port.unwrap_or(settings.port),
        enable_cors: settings.enable_cors && !args.no_cors,
        frontend_dir,
        chat_history: config.files.chat_history.clone(),
    }
}
