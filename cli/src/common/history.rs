//! # Chat Transcript
//!
//! File: cli/src/common/history.rs
//!
//! Appends each turn to a plain-text transcript:
//!
//! ```text
//!
//! ============================================================
//! [2025-01-31 12:30:05]
//! User: chicken rice nutrition
//! Bot: here's the nutrition info for chicken rice: ...
//! ```
//!
//! Writing the transcript is best effort. A failure is logged and the turn
//! carries on.
//!
use super::fs::io::append_to_file;
use crate::core::error::Result;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::path::Path;
use tracing::warn;

const SEPARATOR_WIDTH: usize = 60;

/// Formats one transcript entry.
pub fn format_entry<Tz>(at: &DateTime<Tz>, user_message: &str, bot_response: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "\n{}\n[{}]\nUser: {}\nBot: {}\n",
        "=".repeat(SEPARATOR_WIDTH),
        at.format("%Y-%m-%d %H:%M:%S"),
        user_message,
        bot_response
    )
}

pub fn append_turn(path: &Path, user_message: &str, bot_response: &str) -> Result<()> {
    append_to_file(path, &format_entry(&Local::now(), user_message, bot_response))
}

/// Like [`append_turn`], but only logs on failure.
pub fn record_turn(path: &Path, user_message: &str, bot_response: &str) {
    if let Err(e) = append_turn(path, user_message, bot_response) {
        warn!("Could not save chat history to {}: {:#}", path.display(), e);
    }
}
