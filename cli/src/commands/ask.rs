//! # NutriBot Ask Command (`nutribot ask`)
//!
//! File: cli/src/commands/ask.rs
//!
//! Runs a single turn and prints the reply. Sessions live in memory, so each
//! invocation starts a fresh conversation; use `chat` or `srv` for multi-turn
//! exchanges.
//!
use crate::assistant::Assistant;
use crate::common::history;
use crate::core::config::Config;
use crate::core::error::{NutribotError, Result};
use clap::Parser;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(about = "Ask a single question and print the answer")]
pub struct AskArgs {
    /// The message to send, e.g. "chicken rice nutrition".
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// User identifier for the turn.
    #[arg(long, short, default_value = "console")]
    pub user: String,
}

impl AskArgs {
    /// Words joined with single spaces and trimmed.
    fn message_text(&self) -> String {
        self.message.join(" ").trim().to_string()
    }
}

pub async fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    info!("Handling ask command...");
    let message = args.message_text();
    if message.is_empty() {
        anyhow::bail!(NutribotError::ArgumentParsing(
            "Message cannot be empty.".to_string()
        ));
    }
    debug!("Asking as '{}': {}", args.user, message);

    let assistant = Assistant::from_config(config)?;
    let reply = assistant.respond(&message, &args.user).await;
    history::record_turn(&config.files.chat_history, &message, &reply);
    println!("{}", reply);
    Ok(())
}
