//! Shared command plumbing
//!
//! This module contains:
//! - `Session` - settings, "today" and output mode resolved from flags
//! - `open_ledger` - load the transaction list
//! - `print_json` - `--json` output
//! - `cmd_config` - show the resolved settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use runway_core::config::default_config_path;
use runway_core::models::parse_day;
use runway_core::{ledger, Settings, Transaction};
use serde::Serialize;
use tracing::debug;

/// Everything a command needs besides its own arguments
pub struct Session {
    pub settings: Settings,
    pub today: NaiveDate,
    pub json: bool,
    /// Explicit --ledger, falling back to the settings file
    pub ledger: Option<PathBuf>,
    /// Explicit --config, falling back to the default override location
    pub config_path: Option<PathBuf>,
}

impl Session {
    pub fn new(
        config: Option<&Path>,
        ledger: Option<&Path>,
        today: Option<&str>,
        json: bool,
    ) -> Result<Self> {
        let settings = Settings::load(config).context("Failed to load settings")?;
        let config_path = config.map(Path::to_path_buf).or_else(default_config_path);
        let today = resolve_today(today)?;
        let ledger = ledger
            .map(Path::to_path_buf)
            .or_else(|| settings.ledger.clone());

        debug!(%today, ledger = ?ledger, "Session resolved");

        Ok(Self {
            settings,
            today,
            json,
            ledger,
            config_path,
        })
    }

    /// Load the ledger for commands that read transactions
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let path = self.ledger.as_deref().context(
            "No ledger given. Pass --ledger <file> or set [ledger] path in the settings file",
        )?;
        open_ledger(path)
    }

    pub fn money(&self, amount: f64) -> String {
        self.settings.money(amount)
    }
}

/// `--today` when given, else the local calendar date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_day(s).context("Invalid --today date (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn open_ledger(path: &Path) -> Result<Vec<Transaction>> {
    ledger::load(path).with_context(|| format!("Failed to read ledger {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn cmd_config(session: &Session) -> Result<()> {
    if session.json {
        return print_json(&session.settings);
    }

    let settings = &session.settings;
    println!();
    println!("⚙️  Settings");
    println!("   ─────────────────────────────────────────────");
    match &session.config_path {
        Some(path) if path.exists() => println!("   Settings file:  {}", path.display()),
        Some(path) => println!("   Settings file:  {} (not present, using defaults)", path.display()),
        None => println!("   Settings file:  (no config directory, using defaults)"),
    }
    println!("   Currency:       {}", settings.currency);
    match &session.ledger {
        Some(path) => println!("   Ledger:         {}", path.display()),
        None => println!("   Ledger:         (not set)"),
    }
    println!("   Monthly budget: {}", session.money(settings.monthly_budget));
    println!("   Savings goal:   {}", session.money(settings.savings_goal));
    println!("   Today:          {}", session.today);

    Ok(())
}
