//! Dashboard summary
//!
//! Composes the aggregator, forecaster, scorer, streak and weekly insights
//! into the one value object the home screen renders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, month_transactions};
use crate::forecast::{forecast, ForecastResult, RiskBand};
use crate::insights::{suggestions, weekly_insights, Suggestion, WeeklyInsights};
use crate::models::{DailyPoint, MonthWindow, OrderedTotals, Transaction};
use crate::stability::stability_score;
use crate::streak::streak;

/// How many of the month's transactions the summary lists
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub month_income: f64,
    pub month_expense: f64,
    /// Signed balance, may be negative
    pub current_balance: f64,
    pub available_balance: f64,
    pub safe_daily_spend: f64,
    pub remaining_days: u32,
    pub forecast: ForecastResult,
    pub financial_score: u8,
    pub alert: RiskBand,
    pub weekly_insights: Option<WeeklyInsights>,
    pub suggestions: Vec<Suggestion>,
    pub streak: u32,
    pub category_totals: OrderedTotals<String>,
    pub daily_spending: Vec<DailyPoint>,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

pub fn dashboard(transactions: &[Transaction], today: NaiveDate) -> DashboardSummary {
    let window = MonthWindow::for_day(today);
    let aggregates = aggregate(transactions, today);
    let month = aggregates.month;

    let forecast = forecast(
        month.income,
        month.expense,
        month.available_balance(),
        window.days_elapsed,
        window.days_remaining,
    );

    let weekly = weekly_insights(transactions, today);
    let advice = suggestions(weekly.as_ref(), month.expense);

    let mut recent: Vec<Transaction> = month_transactions(transactions, today).cloned().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_LIMIT);

    DashboardSummary {
        today,
        month_income: month.income,
        month_expense: month.expense,
        current_balance: month.balance(),
        available_balance: month.available_balance(),
        safe_daily_spend: forecast.safe_daily_spend,
        remaining_days: window.days_remaining,
        financial_score: stability_score(month.income, month.expense, month.available_balance()),
        alert: forecast.risk,
        forecast,
        weekly_insights: weekly,
        suggestions: advice,
        streak: streak(transactions, today),
        category_totals: aggregates.categories,
        daily_spending: aggregates.daily,
        recent_transactions: recent,
    }
}
