//! # NutriBot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used by the NutriBot plumbing (config
//! loading, file helpers, the HTTP server). The assistant core itself never
//! surfaces an error to the caller of a turn: a failed lookup or a broken data
//! file degrades to a textual answer. Errors only reach the user when the
//! process cannot start (bad config, port unavailable, etc.).
//!
//! ## Architecture
//!
//! - `NutribotError`: a `thiserror` enum for the specific failure domains.
//! - `Result<T>`: an alias for `anyhow::Result<T>` so call sites can add context.
//!
//! ## Examples
//!
//! ```ignore
//! // Return a specific error type
//! if config.api.timeout_secs == 0 {
//!     return Err(NutribotError::Config("timeout_secs must be greater than zero".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the NutriBot application.
#[derive(Error, Debug)]
pub enum NutribotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Nutrition lookup failed: {0}")]
    Lookup(String),

    #[error("Nutrition service returned HTTP {status} for '{query}'")]
    LookupStatus { status: u16, query: String },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
