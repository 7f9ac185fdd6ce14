//! # NutriBot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the NutriBot CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading `nutribot.toml` once for every command
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`chat`, `ask`, `status`, `srv`) is a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! nutribot --help
//!
//! # One question, with debug logging
//! nutribot -vv ask "chicken rice nutrition"
//!
//! # Start the web API with an explicit config file
//! nutribot --config ./nutribot.toml srv --port 8080
//! ```
//!
use clap::Parser;
use nutribot::{commands, core::config};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "nutribot",
    about = "🥗 NutriBot: Singapore Nutrition Assistant",
    long_about = "Nutrition facts for local dishes, diet myth busting, healthy swaps and\n\
                  HPB guideline tips for diabetes, blood pressure and cholesterol.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Path to nutribot.toml (skips the project and user config search).
    #[arg(long, global = true, env = "NUTRIBOT_CONFIG")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    Status(commands::status::StatusArgs),
    #[command(alias = "s")]
    Srv(commands::srv::SrvArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args, &cfg).await,
        Commands::Ask(args) => commands::ask::handle_ask(args, &cfg).await,
        Commands::Status(args) => commands::status::handle_status(args, &cfg).await,
        Commands::Srv(args) => commands::srv::handle_srv(args, &cfg).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
