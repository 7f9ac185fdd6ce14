//! # NutriBot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test builds
//! a [`TestWorkspace`]: a temporary directory with a `nutribot.toml` and small
//! data files. The config points the USDA client at a closed local port with
//! a short timeout, so no test ever reaches the network.
//!
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FOODS: &str = r#"# name, then nutrients per serving
{"name": "chicken rice", "calories": 607, "protein": 25, "carbs": 78, "fat": 20, "sodium": 900, "fiber": 1, "sugar": 2}
{"name": "yong tau foo", "calories": 380, "protein": 22, "carbs": 40, "fat": 12, "sodium": 500}
{"name": "kaya toast", "calories": 300, "sugar": 18}
"#;

pub const MYTHS: &str = r#"{"keywords": ["carbs bad", "carbohydrates bad"], "myth": "All carbs are bad", "truth": "Complex carbs from whole grains are good for you", "tip": "Choose brown rice over white rice"}
"#;

pub const SWAPS: &str = r#"{"category": "diabetes", "unhealthy": "Teh", "healthy": "Teh-C kosong", "benefit": "No condensed milk or sugar"}
{"category": "blood_pressure", "unhealthy": "Instant noodles", "healthy": "Sliced fish soup", "benefit": "Far less sodium"}
{"category": "cholesterol", "unhealthy": "Fried chicken wing", "healthy": "Steamed chicken", "benefit": "Less saturated fat"}
"#;

/// Get an `assert_cmd::Command` for the compiled `nutribot` binary.
pub fn nutribot_cmd() -> Command {
    Command::cargo_bin("nutribot").expect("Failed to find nutribot binary for testing")
}

/// A temporary directory holding a config file and the three data files.
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self::with_data(FOODS, MYTHS, SWAPS)
    }

    pub fn with_data(foods: &str, myths: &str, swaps: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp workspace");
        let data = dir.path().join("data");
        fs::create_dir_all(&data).expect("Failed to create data dir");
        fs::write(data.join("sg_foods.txt"), foods).expect("write foods");
        fs::write(data.join("myths.txt"), myths).expect("write myths");
        fs::write(data.join("swaps.txt"), swaps).expect("write swaps");
        let workspace = Self { dir };
        workspace.write_config("");
        workspace
    }

    /// Writes `nutribot.toml` with offline API settings plus `extra` TOML.
    pub fn write_config(&self, extra: &str) {
        let config = format!(
            r#"[api]
usda_url = "http://127.0.0.1:9/fdc/v1/foods/search"
timeout_secs = 1

[files]
sg_foods = "data/sg_foods.txt"
myths = "data/myths.txt"
swaps = "data/swaps.txt"
chat_history = "data/chat_history.txt"

{}
"#,
            extra
        );
        fs::write(self.config_path(), config).expect("write config");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("nutribot.toml")
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.path().join("data/chat_history.txt")
    }

    /// A `nutribot` command running inside the workspace with a clean environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = nutribot_cmd();
        cmd.current_dir(self.path())
            .env_remove("USDA_API_KEY")
            .env_remove("NUTRIBOT_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}
