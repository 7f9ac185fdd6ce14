//! # NutriBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level commands of the `nutribot` CLI. Each module defines its
//! clap arguments struct and an async `handle_*` function that receives the
//! parsed arguments and the loaded configuration.
//!
//! ## Command Groups
//!
//! - `ask`: answer one message and exit
//! - `chat`: interactive console conversation
//! - `srv`: HTTP API and web frontend
//! - `status`: data file and API key summary
//!

/// One-shot question.
pub mod ask;
/// Interactive console conversation.
pub mod chat;
/// HTTP server for the web frontend. Includes configuration, routes and server logic.
pub mod srv;
/// Data and API status report.
pub mod status;
