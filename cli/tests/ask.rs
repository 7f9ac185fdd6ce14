//! # NutriBot CLI Ask Integration Tests
//!
//! File: cli/tests/ask.rs
//!
//! ## Overview
//!
//! Runs single turns through `nutribot ask` against a temporary data set.
//! External lookups point at a closed port, so dishes missing from the local
//! table exercise the "not found" path.
//!
mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_ask_local_food() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["ask", "chicken", "rice", "nutrition"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("here's the nutrition info for chicken rice:")
                .and(predicate::str::contains("Calories: 607 kcal"))
                .and(predicate::str::contains("Sodium: 900mg"))
                .and(predicate::str::contains(
                    "WARNING: This is quite high in sodium! HPB recommends less than",
                )),
        );
}

#[test]
fn test_ask_sugar_warning() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["ask", "kaya toast calories"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Fat: N/Ag")
                .and(predicate::str::contains("WARNING: High sugar content")),
        );
}

#[test]
fn test_ask_myth_wins_over_nutrition() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["ask", "are carbs bad? how many calories in chicken rice"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("MYTH: All carbs are bad")
                .and(predicate::str::contains("TIP: Choose brown rice over white rice"))
                .and(predicate::str::contains("Calories").not()),
        );
}

#[test]
fn test_ask_unknown_food_when_lookup_unreachable() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["ask", "nonexistent dish xyz nutrition"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("hmm, I couldn't find that food in my database.")
                .and(predicate::str::contains("- Yong tau foo")),
        );
}

#[test]
fn test_ask_condition_lists_matching_swaps() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["ask", "tips for my hypertension"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("here's how to manage blood pressure with food:")
                .and(predicate::str::contains("- Instant noodles → Sliced fish soup"))
                .and(predicate::str::contains("Teh-C").not()),
        );
}

#[test]
fn test_ask_custom_guidelines() {
    let ws = TestWorkspace::new();
    ws.write_config(
        "[hpb_guidelines.blood_pressure]\nnormal = \"<120/80\"\nsodium_limit = \"1500mg a day\"\n",
    );
    ws.cmd()
        .args(["ask", "chicken rice info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HPB recommends less than 1500mg a day"));
}

#[test]
fn test_ask_greeting_then_fresh_session() {
    let ws = TestWorkspace::new();
    // Each invocation is a new process, so every greeting is a first greeting.
    for _ in 0..2 {
        ws.cmd()
            .args(["ask", "hello"])
            .assert()
            .success()
            .stdout(predicate::str::contains("What's your name?"));
    }
}

#[test]
fn test_ask_appends_history() {
    let ws = TestWorkspace::new();
    ws.cmd().args(["ask", "thanks"]).assert().success();
    ws.cmd().args(["ask", "yong tau foo nutrition"]).assert().success();

    let history = fs::read_to_string(ws.history_path()).unwrap();
    assert_eq!(history.matches(&"=".repeat(60)).count(), 2);
    assert!(history.contains("User: thanks\nBot: No problem! Eat healthy!\n"));
    assert!(history.contains("User: yong tau foo nutrition\nBot: here's the nutrition info"));
}

#[test]
fn test_ask_blank_message_fails() {
    let ws = TestWorkspace::new();
    ws.cmd()
        .args(["ask", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Message cannot be empty"));
}

#[test]
fn test_ask_requires_message() {
    let ws = TestWorkspace::new();
    ws.cmd().arg("ask").assert().failure();
}

#[test]
fn test_ask_with_missing_data_files() {
    let ws = TestWorkspace::new();
    fs::remove_dir_all(ws.path().join("data")).unwrap();
    ws.cmd()
        .args(["ask", "how to swap my lunch"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "here are some healthy food swaps you can make:",
        ));
}
