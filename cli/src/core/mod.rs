//! # NutriBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! - `config`: Loading, path resolution and validation of `nutribot.toml`
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{NutribotError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
