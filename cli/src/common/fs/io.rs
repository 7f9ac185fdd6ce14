//! # NutriBot Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that attach the offending path to every
//! error via `anyhow::Context`.
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) if missing and
//!   rejects paths that exist but are not directories.
//! - **`append_to_file`**: appends text to a file, creating the file and its
//!   parent directory on first use. Used for the chat transcript.
//!
use crate::core::error::{NutribotError, Result};
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Creates `path` (with parents) unless it already is a directory.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(NutribotError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Appends `content` to the end of `path`.
pub fn append_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?} for appending", path))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to append to file {:?}", path))?;
    Ok(())
}
