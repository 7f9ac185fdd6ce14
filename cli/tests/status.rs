//! # NutriBot CLI Status Integration Tests
//!
//! File: cli/tests/status.rs
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_status_counts_records() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Foods:      3")
                .and(predicate::str::contains("Myths:      1"))
                .and(predicate::str::contains("Swaps:      3"))
                .and(predicate::str::contains("not configured (using DEMO_KEY)")),
        );
}

#[test]
fn test_status_skips_malformed_lines() {
    let ws = TestWorkspace::with_data(
        "{\"name\": \"laksa\"}\nnot json\n{\"calories\": 10}\n",
        "",
        "",
    );
    ws.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Foods:      1"));
}

#[test]
fn test_status_api_key_from_environment() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .env("USDA_API_KEY", "my-real-key")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("USDA API key: configured"));
}
