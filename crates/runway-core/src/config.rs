//! User settings
//!
//! Settings are loaded with a two-layer resolution:
//! 1. An override file (explicit path, or ~/.config/runway/config.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Budget and savings goal only affect presentation. The forecasting and
//! decision constants are fixed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    /// Ledger read when none is given on the command line
    pub ledger: Option<PathBuf>,
    pub monthly_budget: f64,
    pub savings_goal: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "₹".to_string(),
            ledger: None,
            monthly_budget: 5000.0,
            savings_goal: 1000.0,
        }
    }
}

impl Settings {
    /// Load settings (override first, then defaults)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let content = match path {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Reading settings override");
                fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// Format an amount with the configured currency symbol
    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency, amount)
    }
}

/// Default settings override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("runway").join("config.toml"))
}

/// Expand a leading `~/` against the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    ledger: Option<RawLedger>,
    budget: Option<RawBudget>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLedger {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    monthly_budget: Option<f64>,
    savings_goal: Option<f64>,
}

/// Parse settings from TOML content
fn parse_config(content: &str) -> Result<Settings> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut settings = Settings::default();

    if let Some(display) = raw.display {
        if let Some(currency) = display.currency {
            settings.currency = currency;
        }
    }

    if let Some(ledger) = raw.ledger {
        settings.ledger = ledger.path.as_deref().map(expand_home);
    }

    if let Some(budget) = raw.budget {
        if let Some(monthly) = budget.monthly_budget {
            if monthly < 0.0 {
                return Err(Error::Config(format!(
                    "monthly_budget must not be negative, got {}",
                    monthly
                )));
            }
            settings.monthly_budget = monthly;
        }
        if let Some(goal) = budget.savings_goal {
            if goal < 0.0 {
                return Err(Error::Config(format!(
                    "savings_goal must not be negative, got {}",
                    goal
                )));
            }
            settings.savings_goal = goal;
        }
    }

    Ok(settings)
}
