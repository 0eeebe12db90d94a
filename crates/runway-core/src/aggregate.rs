//! Transaction aggregation
//!
//! Reduces a raw transaction list into the sums every other part of the
//! engine works from: income/expense totals, per-category, per-weekday and
//! per-day expense.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    month_prefix, DailyPoint, OrderedTotals, Transaction, WeekdayTotals, DATE_FORMAT,
};

/// Days covered by the spending-trend series (plus today)
pub const TREND_DAYS: u32 = 30;

/// Income and expense sums over some set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub income_count: usize,
    pub expense_count: usize,
}

impl Totals {
    /// Signed `income - expense`
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    /// Balance floored at zero, the figure safe-spend arithmetic divides
    pub fn available_balance(&self) -> f64 {
        self.balance().max(0.0)
    }
}

/// Everything the dashboard-style views need from one pass over the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Current calendar month only
    pub month: Totals,
    /// Whole history
    pub lifetime: Totals,
    /// Current-month expense per category, first-seen order
    pub categories: OrderedTotals<String>,
    /// Whole-history expense per weekday
    pub weekdays: WeekdayTotals,
    /// Expense per day from `today - 30` through `today`
    pub daily: Vec<DailyPoint>,
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for tx in transactions {
        if tx.is_income() {
            totals.income += tx.amount;
            totals.income_count += 1;
        } else {
            totals.expense += tx.amount;
            totals.expense_count += 1;
        }
    }
    totals
}

/// Transactions whose date carries the `YYYY-MM` prefix of `today`
pub fn month_transactions(
    transactions: &[Transaction],
    today: NaiveDate,
) -> impl Iterator<Item = &Transaction> {
    let prefix = month_prefix(today);
    transactions.iter().filter(move |tx| tx.in_month(&prefix))
}

pub fn category_totals<'a, I>(transactions: I) -> OrderedTotals<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = OrderedTotals::new();
    for tx in transactions.into_iter().filter(|tx| tx.is_expense()) {
        totals.add(tx.category.clone(), tx.amount);
    }
    totals
}

/// Expense per weekday. Transactions whose date does not parse are left out.
pub fn weekday_totals<'a, I>(transactions: I) -> WeekdayTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = WeekdayTotals::default();
    for tx in transactions.into_iter().filter(|tx| tx.is_expense()) {
        match tx.day() {
            Some(day) => totals.add(day.weekday(), tx.amount),
            None => debug!(date = %tx.date, "Skipping unparseable date in weekday totals"),
        }
    }
    totals
}

/// Zero-filled expense series from `today - days` to `today`, oldest first,
/// labelled `MM-DD`.
pub fn daily_series(transactions: &[Transaction], today: NaiveDate, days: u32) -> Vec<DailyPoint> {
    let mut by_date: HashMap<&str, f64> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        *by_date.entry(tx.date.as_str()).or_insert(0.0) += tx.amount;
    }

    (0..=days)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back as i64);
            let key = day.format(DATE_FORMAT).to_string();
            DailyPoint {
                label: day.format("%m-%d").to_string(),
                amount: by_date.get(key.as_str()).copied().unwrap_or(0.0),
            }
        })
        .collect()
}

/// Aggregate a ledger snapshot as seen on `today`
pub fn aggregate(transactions: &[Transaction], today: NaiveDate) -> Aggregates {
    let month: Vec<&Transaction> = month_transactions(transactions, today).collect();

    let aggregates = Aggregates {
        month: totals(month.iter().copied()),
        lifetime: totals(transactions),
        categories: category_totals(month.iter().copied()),
        weekdays: weekday_totals(transactions),
        daily: daily_series(transactions, today, TREND_DAYS),
    };

    debug!(
        transactions = transactions.len(),
        month_transactions = month.len(),
        month_expense = aggregates.month.expense,
        "Aggregated ledger"
    );

    aggregates
}
