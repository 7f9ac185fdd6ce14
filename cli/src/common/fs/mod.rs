//! # NutriBot Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers. Import from the submodule directly, e.g.
//! `crate::common::fs::io::append_to_file`.
//!
//! - **`io`**: ensuring directories exist and appending text to files.
//!
pub mod io;
