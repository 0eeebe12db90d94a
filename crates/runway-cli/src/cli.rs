//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Runway - How long will your money last this month?
#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Student finance forecaster and spending advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger file (.csv or .json); defaults to the path in settings
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Settings file (defaults to ~/.config/runway/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of the local date
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print machine-readable JSON instead of a report
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Month overview: balance, safe daily spend, forecast and advice
    Dashboard,

    /// Trailing-week insights and suggestions
    Insights,

    /// Monthly report: breakdowns, survival and behaviour notes
    Report,

    /// Survival forecast for the rest of the month
    Forecast,

    /// Consecutive days without an expense
    Streak,

    /// Stability score for arbitrary figures
    Score {
        /// Total income
        #[arg(long, default_value = "0")]
        income: f64,

        /// Total expense
        #[arg(long, default_value = "0")]
        expense: f64,

        /// Available balance (defaults to income minus expense, floored at 0)
        #[arg(long)]
        balance: Option<f64>,
    },

    /// Can I spend this amount today?
    Check {
        /// Amount to spend
        amount: f64,
    },

    /// Simulate a purchase against the rest of the month
    Buy {
        /// Purchase price
        price: f64,

        /// What you are buying
        #[arg(short, long)]
        item: Option<String>,
    },

    /// Guess the category for a description
    Categorize {
        /// Free-text description, e.g. "Swiggy dinner"
        description: String,
    },

    /// Turn a bank SMS into a transaction
    ParseMessage {
        /// Message text, e.g. "Rs. 250 debited for Zomato"
        text: String,
    },

    /// Show the resolved settings
    Config,
}
