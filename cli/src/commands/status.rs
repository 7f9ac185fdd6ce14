//! # NutriBot Status Command (`nutribot status`)
//!
//! File: cli/src/commands/status.rs
//!
//! Prints how many foods, myths and swaps are loadable from the configured
//! data files and whether a real USDA API key is configured. Missing files
//! count as zero records, exactly as the assistant would see them.
//!
use crate::assistant::store::LexicalStore;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Show loaded data and API key status")]
pub struct StatusArgs {}

pub async fn handle_status(_args: StatusArgs, config: &Config) -> Result<()> {
    info!("Handling status command...");
    print!("{}", render_status(config));
    Ok(())
}

fn file_line(out: &mut String, label: &str, count: usize, path: &Path) {
    let note = if path.is_file() { "" } else { " (missing)" };
    let _ = writeln!(out, "  {:<8} {:>4}  {}{}", label, count, path.display(), note);
}

pub fn render_status(config: &Config) -> String {
    let store = LexicalStore::from_config(&config.files);
    let mut out = String::from("--- NutriBot Status ---\n");
    file_line(&mut out, "Foods:", store.load_foods().len(), &config.files.sg_foods);
    file_line(&mut out, "Myths:", store.load_myths().len(), &config.files.myths);
    file_line(&mut out, "Swaps:", store.load_swaps().len(), &config.files.swaps);
    let _ = writeln!(out, "  Chat history: {}", config.files.chat_history.display());
    let _ = writeln!(
        out,
        "  USDA API key: {}",
        if config.api.is_configured() {
            "configured"
        } else {
            "not configured (using DEMO_KEY)"
        }
    );
    out
}
