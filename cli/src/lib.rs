//! # NutriBot Library
//!
//! File: cli/src/lib.rs
//!
//! The assistant core and the command implementations, shared by the
//! `nutribot` binary and the integration tests.
//!
pub mod assistant; // Classification, lookup, composition and sessions
pub mod commands; // ask, chat, srv, status
pub mod common; // Shared helpers (fs, chat history)
pub mod core; // Core infrastructure (errors, config)
