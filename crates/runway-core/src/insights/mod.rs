//! Insight and advice engine
//!
//! Turns recent spending into behavioral summaries and rule-based advice.
//!
//! ## Views
//!
//! - **Weekly insights** - trailing seven days of expenses, plus the weekly
//!   advice rules
//! - **Monthly report** - lifetime breakdowns, current-month survival and a
//!   separate monthly advice set
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use runway_core::insights::{suggestions, weekly_insights};
//! use runway_core::models::Transaction;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let txs = vec![Transaction::expense(1000.0, "Food", "2024-03-14")];
//! let week = weekly_insights(&txs, today);
//! let advice = suggestions(week.as_ref(), 1000.0);
//! assert!(!advice.is_empty());
//! ```

pub mod report;
pub mod rules;
pub mod types;
pub mod weekly;

pub use report::{monthly_report, MonthlyReport};
pub use rules::{monthly_rules, weekly_rules, MonthlyContext, Rule, RuleSet};
pub use types::{Suggestion, SuggestionKind, WeeklyInsights};
pub use weekly::{suggestions, weekly_insights};
