//! Survival forecaster
//!
//! Projects the available balance forward at the month's average daily
//! spend to estimate how long the money lasts and what can safely be spent
//! per day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{month_transactions, totals};
use crate::models::{MonthWindow, Transaction, NEVER_RUNS_OUT};

/// Days of slack past month end before a forecast stops being a warning
pub const WARNING_MARGIN_DAYS: u32 = 3;

/// Three-tier risk band shared by the dashboard alert and spend advisories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Money runs out before month end
    Danger,
    /// Money lasts, but only just
    Warning,
    /// Comfortably past month end
    Safe,
}

impl RiskBand {
    pub fn classify(forecast_days: u32, days_remaining: u32) -> Self {
        if forecast_days < days_remaining {
            Self::Danger
        } else if forecast_days <= days_remaining + WARNING_MARGIN_DAYS {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Safe => "safe",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Projected balance at the start of a day of the month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub day: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub available_balance: f64,
    pub days_remaining: u32,
    pub safe_daily_spend: f64,
    pub avg_daily_spend: f64,
    /// Whole days until the balance hits zero, `NEVER_RUNS_OUT` when nothing
    /// is being spent
    pub forecast_days: u32,
    pub risk: RiskBand,
    /// One point per remaining day, never increasing, floored at zero
    pub curve: Vec<ForecastPoint>,
    /// Balance is projected to reach zero inside the window
    pub runs_out: bool,
    pub message: String,
}

/// Whole days a balance lasts at `avg_daily_spend`
pub fn survival_days(available_balance: f64, avg_daily_spend: f64) -> u32 {
    if avg_daily_spend <= 0.0 {
        if available_balance > 0.0 {
            NEVER_RUNS_OUT
        } else {
            0
        }
    } else if available_balance > 0.0 {
        (available_balance / avg_daily_spend).trunc() as u32
    } else {
        0
    }
}

pub fn forecast(
    total_income: f64,
    total_expense: f64,
    available_balance: f64,
    days_elapsed: u32,
    days_remaining: u32,
) -> ForecastResult {
    let days_elapsed = days_elapsed.max(1);
    let days_remaining = days_remaining.max(1);
    let available_balance = available_balance.max(0.0);

    let avg_daily_spend = total_expense / days_elapsed as f64;
    let safe_daily_spend = available_balance / days_remaining as f64;

    let mut curve = Vec::with_capacity(days_remaining as usize);
    let mut projected = available_balance;
    for offset in 1..=days_remaining {
        curve.push(ForecastPoint {
            day: days_elapsed + offset,
            balance: projected.max(0.0),
        });
        projected -= avg_daily_spend;
    }

    let forecast_days = survival_days(available_balance, avg_daily_spend);
    let risk = RiskBand::classify(forecast_days, days_remaining);

    let runs_out = projected <= 0.0;
    let message = if runs_out {
        format!(
            "At this rate you may run out of money in {} days.",
            forecast_days
        )
    } else {
        "You are safe.".to_string()
    };

    debug!(
        total_income,
        total_expense,
        available_balance,
        avg_daily_spend,
        forecast_days,
        risk = risk.as_str(),
        "Forecast computed"
    );

    ForecastResult {
        available_balance,
        days_remaining,
        safe_daily_spend,
        avg_daily_spend,
        forecast_days,
        risk,
        curve,
        runs_out,
        message,
    }
}

/// Forecast for the month containing `today`
pub fn month_forecast(transactions: &[Transaction], today: NaiveDate) -> ForecastResult {
    let window = MonthWindow::for_day(today);
    let month = totals(month_transactions(transactions, today));

    forecast(
        month.income,
        month.expense,
        month.available_balance(),
        window.days_elapsed,
        window.days_remaining,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{day, month_with};

    #[test]
    fn test_safe_daily_spend() {
        // income 10000, expense 3000, 20 days to go
        let result = forecast(10000.0, 3000.0, 7000.0, 10, 20);
        assert_eq!(result.available_balance, 7000.0);
        assert_eq!(result.safe_daily_spend, 350.0);
        assert_eq!(result.avg_daily_spend, 300.0);
        assert_eq!(result.forecast_days, 23);
        assert_eq!(result.risk, RiskBand::Warning);
        assert_eq!(result.message, "You are safe.");
    }

    #[test]
    fn test_curve_shape() {
        let result = forecast(1000.0, 900.0, 100.0, 3, 5);
        let balances: Vec<f64> = result.curve.iter().map(|p| p.balance).collect();

        assert_eq!(result.curve.len(), 5);
        assert_eq!(balances, vec![100.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(result.curve[0].day, 4);
        assert!(balances.windows(2).all(|w| w[1] <= w[0]));
        assert!(result.runs_out);
        assert_eq!(
            result.message,
            "At this rate you may run out of money in 0 days."
        );
    }

    #[test]
    fn test_runs_out_message_truncates() {
        // 1000 available at 300/day lasts 3.33 days
        let result = forecast(4000.0, 3000.0, 1000.0, 10, 20);
        assert_eq!(result.forecast_days, 3);
        assert_eq!(result.risk, RiskBand::Danger);
        assert_eq!(
            result.message,
            "At this rate you may run out of money in 3 days."
        );
    }

    #[test]
    fn test_no_spending_never_runs_out() {
        let result = forecast(500.0, 0.0, 500.0, 10, 20);
        assert_eq!(result.forecast_days, NEVER_RUNS_OUT);
        assert_eq!(result.risk, RiskBand::Safe);
        assert!(!result.runs_out);

        let broke = forecast(0.0, 0.0, 0.0, 10, 20);
        assert_eq!(broke.forecast_days, 0);
    }

    #[test]
    fn test_denominators_clamped() {
        let result = forecast(100.0, 50.0, 50.0, 0, 0);
        assert_eq!(result.days_remaining, 1);
        assert_eq!(result.safe_daily_spend, 50.0);
        assert_eq!(result.avg_daily_spend, 50.0);
        assert_eq!(result.curve.len(), 1);
    }

    #[test]
    fn test_negative_balance_clamped() {
        let result = forecast(100.0, 500.0, -400.0, 5, 10);
        assert_eq!(result.available_balance, 0.0);
        assert_eq!(result.safe_daily_spend, 0.0);
        assert!(result.curve.iter().all(|p| p.balance == 0.0));
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskBand::classify(9, 10), RiskBand::Danger);
        assert_eq!(RiskBand::classify(10, 10), RiskBand::Warning);
        assert_eq!(RiskBand::classify(13, 10), RiskBand::Warning);
        assert_eq!(RiskBand::classify(14, 10), RiskBand::Safe);
    }

    #[test]
    fn test_month_forecast_from_ledger() {
        let txs = month_with(10000.0, 3000.0, "2024-04");
        // April 10th: 10 days elapsed, 20 remaining
        let result = month_forecast(&txs, day(2024, 4, 10));
        assert_eq!(result.available_balance, 7000.0);
        assert_eq!(result.safe_daily_spend, 350.0);
        assert_eq!(result.curve.len(), 20);
    }

    #[test]
    fn test_idempotent() {
        let a = forecast(10000.0, 3000.0, 7000.0, 10, 20);
        let b = forecast(10000.0, 3000.0, 7000.0, 10, 20);
        assert_eq!(a, b);
    }
}
