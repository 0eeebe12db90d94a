//! Weekly insights and suggestions

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use super::rules::weekly_rules;
use super::types::{Suggestion, SuggestionKind, WeeklyInsights};
use crate::models::{OrderedTotals, Transaction, DATE_FORMAT};

/// Length of the trailing window, also the divisor for the daily average
pub const WEEK_DAYS: u32 = 7;

/// Summarize expenses dated on or after `today - 7 days`.
///
/// Returns None when the window holds no expenses, so callers can prompt
/// for data instead of showing zeros.
pub fn weekly_insights(transactions: &[Transaction], today: NaiveDate) -> Option<WeeklyInsights> {
    let cutoff = (today - Duration::days(WEEK_DAYS as i64))
        .format(DATE_FORMAT)
        .to_string();

    let weekly: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.is_expense() && tx.date.as_str() >= cutoff.as_str())
        .collect();

    if weekly.is_empty() {
        debug!(cutoff = %cutoff, "No expenses in the trailing week");
        return None;
    }

    let mut categories = OrderedTotals::new();
    let mut days = OrderedTotals::new();
    for tx in &weekly {
        categories.add(tx.category.clone(), tx.amount);
        if let Some(day) = tx.day() {
            days.add(day.weekday(), tx.amount);
        }
    }

    let total_spent = categories.total();
    let highest_category = categories
        .leader()
        .map(|(name, _)| name.clone())
        .unwrap_or_default();
    let expensive_day = days.leader().map(|(day, _)| *day);

    Some(WeeklyInsights {
        total_spent,
        transaction_count: weekly.len(),
        avg_daily_spent: total_spent / WEEK_DAYS as f64,
        highest_category,
        expensive_day,
        categories,
        days,
    })
}

/// Advice for the week, or a single prompt to log expenses when there is
/// nothing to analyze
pub fn suggestions(insights: Option<&WeeklyInsights>, month_expense_total: f64) -> Vec<Suggestion> {
    match insights {
        Some(week) if week.total_spent > 0.0 => {
            debug!(
                week_total = week.total_spent,
                month_expense_total, "Evaluating weekly advice"
            );
            weekly_rules().evaluate(week)
        }
        _ => vec![Suggestion::new(
            SuggestionKind::AddExpenses,
            "Add some expenses this week to get personalized insights!",
        )],
    }
}
