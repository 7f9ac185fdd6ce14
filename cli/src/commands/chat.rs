//! # NutriBot Console Chat (`nutribot chat`)
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! An interactive read-eval-print loop on stdin/stdout:
//! - prints a banner with the data file locations
//! - prompts with `You: ` and answers with `Bot: ...`
//! - skips empty lines
//! - ends on `quit`, `exit` or `bye` (any case) or end of input
//!
//! Every turn is appended to the chat transcript. The loop itself is generic
//! over its input and output streams so it can be driven from tests.
//!
use crate::assistant::Assistant;
use crate::common::history;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

const EXIT_WORDS: &[&str] = &["quit", "exit", "bye"];
const FAREWELL: &str = "Bye! Stay healthy!";

#[derive(Parser, Debug)]
#[command(about = "Chat with the assistant in the terminal")]
pub struct ChatArgs {
    /// User identifier for this console session.
    #[arg(long, short, default_value = "console")]
    pub user: String,
}

pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    info!("Handling chat command for user '{}'...", args.user);
    let assistant = Assistant::from_config(config)?;
    print_banner(config);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_repl(
        &assistant,
        &args.user,
        &config.files.chat_history,
        stdin,
        stdout,
    )
    .await
}

fn print_banner(config: &Config) {
    let files = &config.files;
    println!("{}", "=".repeat(60));
    println!("🥗 SINGAPORE NUTRITION ASSISTANT");
    println!("Based on HPB Guidelines");
    println!("{}", "=".repeat(60));
    println!("\n📡 Using API: {}", config.api.usda_url);
    println!("📁 Foods:        {}", files.sg_foods.display());
    println!("📁 Myths:        {}", files.myths.display());
    println!("📁 Swaps:        {}", files.swaps.display());
    println!("💾 Chat history: {}", files.chat_history.display());
    println!("\nType 'quit' to exit\n");
}

/// Runs the prompt loop until an exit word or end of input.
pub async fn run_repl<R, W>(
    assistant: &Assistant,
    user_id: &str,
    history_path: &Path,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(format!("\n{}\n", FAREWELL).as_bytes()).await?;
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            output.write_all(format!("\n{}\n", FAREWELL).as_bytes()).await?;
            break;
        }

        let reply = assistant.respond(message, user_id).await;
        history::record_turn(history_path, message, &reply);
        output
            .write_all(format!("\nBot: {}\n\n", reply).as_bytes())
            .await?;
    }
    output.flush().await?;
    Ok(())
}
