//! Test utilities for runway-core
//!
//! Fixed-date builders so engine tests never depend on the wall clock.

use chrono::NaiveDate;

use crate::models::Transaction;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn expense(amount: f64, category: &str, date: &str) -> Transaction {
    Transaction::expense(amount, category, date)
}

pub fn income(amount: f64, date: &str) -> Transaction {
    Transaction::income(amount, "Income", date)
}

/// A small March 2024 ledger with one February bill.
///
/// Month of March: income 10000, expense 1800 over 4 transactions
/// (Food 700, Shopping 800, Travel 300).
pub fn ledger() -> Vec<Transaction> {
    vec![
        income(10000.0, "2024-03-01"),
        expense(500.0, "Food", "2024-03-02"),
        expense(200.0, "Food", "2024-03-09"),
        expense(800.0, "Shopping", "2024-03-10"),
        expense(300.0, "Travel", "2024-03-12"),
        expense(5000.0, "Bills", "2024-02-20"),
    ]
}

/// A month where `current_balance` is `income - expense` and the average
/// daily spend is `expense / day_of_month`, all dated on the 1st.
pub fn month_with(income_total: f64, expense_total: f64, month: &str) -> Vec<Transaction> {
    let date = format!("{}-01", month);
    let mut txs = Vec::new();
    if income_total > 0.0 {
        txs.push(income(income_total, &date));
    }
    if expense_total > 0.0 {
        txs.push(expense(expense_total, "Others", &date));
    }
    txs
}
