//! Runway Core Library
//!
//! Forecasting and decision engine for the Runway student finance tracker:
//! - Transaction aggregation (month, lifetime, category, weekday, daily)
//! - Stability score (0-100)
//! - Survival forecast and month-end risk banding
//! - Budgeting streak
//! - Weekly insights, rule-based suggestions and the monthly report
//! - Purchase decision simulator and "can I spend this?" check
//! - Keyword categorization and bank SMS parsing
//! - Ledger readers (CSV, JSON) and user settings
//!
//! Every operation is a pure function of the transaction list and an
//! explicit "today".

pub mod aggregate;
pub mod categorize;
pub mod config;
pub mod dashboard;
pub mod decision;
pub mod error;
pub mod forecast;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod stability;
pub mod streak;

/// Fixed-date transaction builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{aggregate, Aggregates, Totals};
pub use categorize::{auto_categorize, parse_message, quick_expense};
pub use config::Settings;
pub use dashboard::{dashboard, DashboardSummary};
pub use decision::{
    check_spend, should_i_buy, DecisionResult, RiskLevel, SpendCheck, SpendVerdict,
};
pub use error::{Error, Result};
pub use forecast::{forecast, month_forecast, ForecastPoint, ForecastResult, RiskBand};
pub use insights::{
    monthly_report, suggestions, weekly_insights, MonthlyReport, Suggestion, SuggestionKind,
    WeeklyInsights,
};
pub use models::{MonthWindow, Transaction, TransactionKind};
pub use stability::stability_score;
pub use streak::streak;
