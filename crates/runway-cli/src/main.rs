//! Runway CLI - How long will your money last?
//!
//! Usage:
//!   runway --ledger ledger.csv dashboard     Month overview and advice
//!   runway --ledger ledger.csv check 300     Can I spend this today?
//!   runway --ledger ledger.csv buy 2500      Simulate a purchase
//!   runway categorize "Swiggy dinner"        Guess a category

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let session = commands::Session::new(
        cli.config.as_deref(),
        cli.ledger.as_deref(),
        cli.today.as_deref(),
        cli.json,
    )?;

    match cli.command {
        Commands::Dashboard => commands::cmd_dashboard(&session),
        Commands::Insights => commands::cmd_insights(&session),
        Commands::Report => commands::cmd_report(&session),
        Commands::Forecast => commands::cmd_forecast(&session),
        Commands::Streak => commands::cmd_streak(&session),
        Commands::Score {
            income,
            expense,
            balance,
        } => commands::cmd_score(&session, income, expense, balance),
        Commands::Check { amount } => commands::cmd_check(&session, amount),
        Commands::Buy { price, item } => commands::cmd_buy(&session, price, item.as_deref()),
        Commands::Categorize { description } => commands::cmd_categorize(&session, &description),
        Commands::ParseMessage { text } => commands::cmd_parse_message(&session, &text),
        Commands::Config => commands::cmd_config(&session),
    }
}
