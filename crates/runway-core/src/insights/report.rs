//! Monthly insights report
//!
//! The long-form view: lifetime breakdowns for charts, a current-month
//! survival estimate, behaviour notes and the monthly advice set.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::rules::{monthly_rules, MonthlyContext};
use super::types::Suggestion;
use crate::aggregate::{category_totals, month_transactions, totals, weekday_totals};
use crate::forecast::RiskBand;
use crate::models::{
    is_weekend, weekday_name, DailyPoint, MonthWindow, OrderedTotals, Transaction, WeekdayTotals,
    NEVER_RUNS_OUT,
};
use crate::stability::stability_score;
use crate::streak::streak;

/// How many distinct spending days the daily chart keeps
pub const REPORT_DAILY_POINTS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub income_total: f64,
    pub expense_total: f64,
    pub category_totals: OrderedTotals<String>,
    /// Most recent spending days, oldest first, labelled by full date
    pub daily_totals: Vec<DailyPoint>,
    pub weekday_totals: WeekdayTotals,
    pub remaining_days_in_month: u32,
    pub survival_days: u32,
    pub survival_band: RiskBand,
    pub survival_message: String,
    pub behaviour_insights: Vec<String>,
    pub smart_rules: Vec<Suggestion>,
    pub stability_score: u8,
    pub streak: u32,
}

/// Survival days rounded to the nearest whole day (ties to even)
fn rounded_survival_days(balance: f64, avg_daily_spend: f64) -> u32 {
    if avg_daily_spend > 0.0 {
        (balance / avg_daily_spend).round_ties_even() as u32
    } else if balance > 0.0 {
        NEVER_RUNS_OUT
    } else {
        0
    }
}

fn survival_message(band: RiskBand, survival_days: u32) -> String {
    match band {
        RiskBand::Danger => format!("⚠ You will run out of money in {} days", survival_days),
        RiskBand::Warning => "⚠ You are cutting it close for the month".to_string(),
        RiskBand::Safe => "✓ You are safe for the rest of the month".to_string(),
    }
}

fn recent_daily_totals(transactions: &[Transaction]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        *by_date.entry(tx.date.as_str()).or_insert(0.0) += tx.amount;
    }

    let skip = by_date.len().saturating_sub(REPORT_DAILY_POINTS);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, amount)| DailyPoint {
            label: date.to_string(),
            amount,
        })
        .collect()
}

pub fn monthly_report(transactions: &[Transaction], today: NaiveDate) -> MonthlyReport {
    let window = MonthWindow::for_day(today);
    let lifetime = totals(transactions);
    let categories = category_totals(transactions);
    let weekdays = weekday_totals(transactions);

    let month: Vec<&Transaction> = month_transactions(transactions, today).collect();
    let month_totals = totals(month.iter().copied());

    let mut ctx = MonthlyContext {
        expense: month_totals.expense,
        transaction_count: month_totals.expense_count,
        ..MonthlyContext::default()
    };
    for tx in month.iter().filter(|tx| tx.is_expense()) {
        if tx.category == "Food" {
            ctx.food_expense += tx.amount;
        }
        if tx.day().is_some_and(|day| is_weekend(day.weekday())) {
            ctx.weekend_expense += tx.amount;
        }
    }

    let balance = month_totals.available_balance();
    let avg_daily_spend = month_totals.expense / window.days_elapsed as f64;
    let survival_days = rounded_survival_days(balance, avg_daily_spend);
    let survival_band = RiskBand::classify(survival_days, window.days_remaining);

    let mut behaviour_insights = Vec::new();
    if let Some((category, _)) = categories.leader() {
        behaviour_insights.push(format!("Most of your money is going to {}.", category));
    }
    if let Some((day, _)) = weekdays.leader() {
        behaviour_insights.push(format!("You spend the most on {}s.", weekday_name(day)));
    }
    behaviour_insights.push(format!(
        "You made {} transactions recently.",
        ctx.transaction_count
    ));
    behaviour_insights.push(format!(
        "Average daily spend is ₹{}.",
        avg_daily_spend.trunc()
    ));

    MonthlyReport {
        income_total: lifetime.income,
        expense_total: lifetime.expense,
        category_totals: categories,
        daily_totals: recent_daily_totals(transactions),
        weekday_totals: weekdays,
        remaining_days_in_month: window.days_remaining,
        survival_days,
        survival_band,
        survival_message: survival_message(survival_band, survival_days),
        behaviour_insights,
        smart_rules: monthly_rules().evaluate(&ctx),
        stability_score: stability_score(month_totals.income, month_totals.expense, balance),
        streak: streak(transactions, today),
    }
}
