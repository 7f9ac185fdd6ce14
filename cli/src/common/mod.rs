//! # NutriBot Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by more than one command, kept apart from the
//! command-specific logic in `commands::` and the infrastructure in `core::`.
//!
//! - **`fs`**: small filesystem wrappers with error context (directory
//!   creation, appending to files).
//! - **`history`**: the plain-text chat transcript written by the console and
//!   the HTTP server.
//!
pub mod fs;
pub mod history;
