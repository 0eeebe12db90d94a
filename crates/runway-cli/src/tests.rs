//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::Path;

use clap::Parser;
use runway_core::test_utils::{day, ledger};
use tempfile::TempDir;

use crate::cli::{Cli, Commands};
use crate::commands::{self, bar, truncate, Session};

/// Write the sample ledger as JSON into a temp dir
fn setup_ledger() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, serde_json::to_string(&ledger()).unwrap()).unwrap();
    (dir, path)
}

/// Session pinned to 2024-03-15 that never reads the user's settings
fn session(dir: &Path, ledger: Option<&Path>, json: bool) -> Session {
    let config = dir.join("absent.toml");
    Session::new(Some(&config), ledger, Some("2024-03-15"), json).unwrap()
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Food", 10), "Food");
    assert_eq!(truncate("Entertainment", 8), "Enter...");
    // Multi-byte characters never split
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}

#[test]
fn test_bar() {
    assert_eq!(bar(0.5, 4), "██░░");
    assert_eq!(bar(2.0, 3), "███");
    assert_eq!(bar(f64::NAN, 2), "░░");
}

// ========== Session Tests ==========

#[test]
fn test_session_resolves_today_and_ledger() {
    let (dir, path) = setup_ledger();
    let session = session(dir.path(), Some(&path), false);

    assert_eq!(session.today, day(2024, 3, 15));
    assert_eq!(session.settings.currency, "₹");
    assert_eq!(session.transactions().unwrap().len(), 6);
}

#[test]
fn test_session_rejects_bad_today() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    assert!(Session::new(Some(&config), None, Some("15-03-2024"), false).is_err());
}

#[test]
fn test_ledger_path_from_settings() {
    let (dir, path) = setup_ledger();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("[ledger]\npath = {:?}\n", path.to_string_lossy()),
    )
    .unwrap();

    let session = Session::new(Some(&config), None, Some("2024-03-15"), false).unwrap();
    assert_eq!(session.ledger.as_deref(), Some(path.as_path()));
    assert_eq!(session.transactions().unwrap().len(), 6);
}

#[test]
fn test_session_keeps_explicit_config_path() {
    let (dir, path) = setup_ledger();
    let config = dir.path().join("other.toml");
    fs::write(&config, "[display]\ncurrency = \"$\"\n").unwrap();

    let session = Session::new(Some(&config), Some(&path), Some("2024-03-15"), false).unwrap();
    assert_eq!(session.config_path.as_deref(), Some(config.as_path()));
    assert_eq!(session.settings.currency, "$");
    assert!(commands::cmd_config(&session).is_ok());

    let missing = dir.path().join("absent.toml");
    let session = Session::new(Some(&missing), None, Some("2024-03-15"), false).unwrap();
    assert_eq!(session.config_path.as_deref(), Some(missing.as_path()));
}

#[test]
fn test_missing_ledger_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path(), None, false);
    assert!(session.transactions().is_err());
    assert!(commands::cmd_dashboard(&session).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_overview_commands() {
    let (dir, path) = setup_ledger();
    for json in [false, true] {
        let session = session(dir.path(), Some(&path), json);
        assert!(commands::cmd_dashboard(&session).is_ok());
        assert!(commands::cmd_forecast(&session).is_ok());
        assert!(commands::cmd_streak(&session).is_ok());
        assert!(commands::cmd_insights(&session).is_ok());
        assert!(commands::cmd_report(&session).is_ok());
        assert!(commands::cmd_config(&session).is_ok());
    }
}

#[test]
fn test_empty_ledger_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "date,type,category,amount,description\n").unwrap();

    let session = session(dir.path(), Some(&path), false);
    assert!(session.transactions().unwrap().is_empty());
    assert!(commands::cmd_dashboard(&session).is_ok());
    assert!(commands::cmd_insights(&session).is_ok());
    assert!(commands::cmd_report(&session).is_ok());
}

#[test]
fn test_cmd_score() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path(), None, false);
    assert!(commands::cmd_score(&session, 10000.0, 3000.0, None).is_ok());
    assert!(commands::cmd_score(&session, 0.0, 0.0, Some(0.0)).is_ok());
    assert!(commands::cmd_score(&session, -1.0, 0.0, None).is_err());
}

// ========== Decision Command Tests ==========

#[test]
fn test_cmd_check() {
    let (dir, path) = setup_ledger();
    let session = session(dir.path(), Some(&path), false);
    assert!(commands::cmd_check(&session, 300.0).is_ok());
    assert!(commands::cmd_check(&session, 5000.0).is_ok());
    assert!(commands::cmd_check(&session, 0.0).is_err());
}

#[test]
fn test_cmd_buy() {
    let (dir, path) = setup_ledger();
    let session = session(dir.path(), Some(&path), true);
    assert!(commands::cmd_buy(&session, 2500.0, Some("Headphones")).is_ok());
    assert!(commands::cmd_buy(&session, 9000.0, None).is_ok());
    assert!(commands::cmd_buy(&session, -10.0, None).is_err());
}

// ========== Entry Command Tests ==========

#[test]
fn test_cmd_categorize() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path(), None, false);
    assert!(commands::cmd_categorize(&session, "Uber to college").is_ok());
}

#[test]
fn test_cmd_parse_message() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path(), None, true);
    assert!(commands::cmd_parse_message(&session, "Rs.450 debited at Swiggy").is_ok());
    assert!(commands::cmd_parse_message(&session, "Your OTP is 1234").is_err());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_buy_with_globals() {
    let cli = Cli::try_parse_from([
        "runway",
        "buy",
        "2500",
        "--item",
        "Headphones",
        "--ledger",
        "ledger.csv",
        "--today",
        "2024-03-15",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.today.as_deref(), Some("2024-03-15"));
    assert_eq!(
        cli.ledger.as_deref(),
        Some(Path::new("ledger.csv"))
    );
    match cli.command {
        Commands::Buy { price, item } => {
            assert_eq!(price, 2500.0);
            assert_eq!(item.as_deref(), Some("Headphones"));
        }
        _ => panic!("expected buy"),
    }
}

#[test]
fn test_parse_score_defaults() {
    let cli = Cli::try_parse_from(["runway", "score", "--income", "5000"]).unwrap();
    match cli.command {
        Commands::Score {
            income,
            expense,
            balance,
        } => {
            assert_eq!(income, 5000.0);
            assert_eq!(expense, 0.0);
            assert_eq!(balance, None);
        }
        _ => panic!("expected score"),
    }
}

#[test]
fn test_parse_message_subcommand_name() {
    let cli = Cli::try_parse_from(["runway", "parse-message", "Rs 99 paid"]).unwrap();
    assert!(matches!(cli.command, Commands::ParseMessage { .. }));
}
