//! Spending decisions
//!
//! Two advisories built from the same month figures:
//! - `should_i_buy` simulates the month with and without a purchase and
//!   issues a risk verdict
//! - `check_spend` answers "can I spend this today?" against the safe daily
//!   spend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{month_transactions, totals};
use crate::error::{Error, Result};
use crate::forecast::{survival_days, RiskBand};
use crate::models::{MonthWindow, Transaction, NEVER_RUNS_OUT};
use crate::stability::stability_score;

/// Safe-price suggestions are rounded down to a multiple of this
pub const SAFE_PRICE_STEP: f64 = 50.0;

/// Spends up to this multiple of the safe daily spend only earn a caution
pub const CAUTION_MULTIPLIER: f64 = 1.5;

const DEFAULT_ITEM_NAME: &str = "Planned purchase";

/// Purchase risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Self::High => "Do NOT buy",
            Self::Medium => "Risky purchase",
            Self::Low => "Safe to buy",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Before/after comparison for one simulated purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub item_name: String,
    pub price: f64,
    /// Signed month balance before the purchase
    pub current_balance: f64,
    /// Signed month balance after the purchase
    pub post_balance: f64,
    pub current_safe_daily: f64,
    pub post_safe_daily: f64,
    pub current_survival_days: f64,
    pub post_survival_days: f64,
    pub stability_score_before: u8,
    pub stability_score_after: u8,
    pub stability_delta: i32,
    pub risk_level: RiskLevel,
    pub verdict: String,
    pub runout_message: String,
    pub safe_price: f64,
    pub days_remaining: u32,
    pub days_short: u32,
}

impl DecisionResult {
    /// Label the simulated purchase; blank names keep the default
    pub fn for_item(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        if !name.is_empty() {
            self.item_name = name.to_string();
        }
        self
    }
}

fn require_positive(value: f64, what: &str) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be greater than zero, got {}",
            what, value
        )));
    }
    Ok(())
}

/// Fractional survival days; balances at or below zero last zero days
fn survival_estimate(balance: f64, avg_daily_spend: f64) -> f64 {
    if avg_daily_spend > 0.0 {
        if balance > 0.0 {
            balance / avg_daily_spend
        } else {
            0.0
        }
    } else if balance > 0.0 {
        NEVER_RUNS_OUT as f64
    } else {
        0.0
    }
}

/// Largest price that still leaves the average daily burn covered until
/// month end, rounded down to `SAFE_PRICE_STEP`
pub fn safe_price(current_balance: f64, avg_daily_spend: f64, days_remaining: u32) -> f64 {
    let raw = if avg_daily_spend > 0.0 {
        current_balance - avg_daily_spend * days_remaining as f64
    } else {
        current_balance
    };
    let raw = raw.max(0.0);

    if raw <= 0.0 {
        0.0
    } else {
        (raw / SAFE_PRICE_STEP).floor() * SAFE_PRICE_STEP
    }
}

/// Simulate buying something at `price` today.
///
/// Only transactions in the month of `today` are considered. Fails with
/// `Error::InvalidInput` when the price is not positive.
pub fn should_i_buy(
    transactions: &[Transaction],
    price: f64,
    today: NaiveDate,
) -> Result<DecisionResult> {
    require_positive(price, "Price")?;

    let window = MonthWindow::for_day(today);
    let days_remaining = window.days_remaining;
    let month = totals(month_transactions(transactions, today));

    let current_balance = month.balance();
    let available_balance = month.available_balance();
    let avg_daily_spend = month.expense / window.days_elapsed as f64;

    let post_balance = current_balance - price;
    let post_available = post_balance.max(0.0);

    let current_survival_days = survival_estimate(current_balance, avg_daily_spend);
    let post_survival_days = survival_estimate(post_available, avg_daily_spend);
    let post_never_runs_out = avg_daily_spend <= 0.0 && post_balance > 0.0;

    let stability_before = stability_score(month.income, month.expense, available_balance);
    let stability_after = stability_score(month.income, month.expense, post_available);
    let stability_delta = stability_after as i32 - stability_before as i32;

    let days_short = if post_never_runs_out {
        0
    } else {
        (days_remaining as f64 - post_survival_days)
            .round_ties_even()
            .max(0.0) as u32
    };

    let high_water = days_remaining.saturating_sub(3) as f64;
    let risk_level = if post_balance < 0.0
        || post_survival_days < high_water
        || stability_delta < -15
    {
        RiskLevel::High
    } else if post_survival_days < days_remaining as f64 || stability_delta < -5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let runout_message = if post_balance <= 0.0 {
        "If you buy this, you will be out of money immediately.".to_string()
    } else if days_short > 0 {
        format!(
            "If you buy this, you will run out of money {} days before month end.",
            days_short
        )
    } else {
        "This purchase does not make you run out before month end.".to_string()
    };

    debug!(
        price,
        current_balance,
        post_balance,
        stability_delta,
        risk = risk_level.as_str(),
        "Purchase simulated"
    );

    Ok(DecisionResult {
        item_name: DEFAULT_ITEM_NAME.to_string(),
        price,
        current_balance,
        post_balance,
        current_safe_daily: available_balance / days_remaining as f64,
        post_safe_daily: post_available / days_remaining as f64,
        current_survival_days,
        post_survival_days,
        stability_score_before: stability_before,
        stability_score_after: stability_after,
        stability_delta,
        risk_level,
        verdict: risk_level.verdict().to_string(),
        runout_message,
        safe_price: safe_price(current_balance, avg_daily_spend, days_remaining),
        days_remaining,
        days_short,
    })
}

/// "Can I spend this today?" tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendVerdict {
    /// Within today's safe daily spend
    Safe,
    /// Over the safe spend but within `CAUTION_MULTIPLIER` of it
    Caution,
    NotRecommended,
}

impl SpendVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::NotRecommended => "not_recommended",
        }
    }
}

impl std::fmt::Display for SpendVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendCheck {
    pub amount: f64,
    pub available_balance: f64,
    pub safe_daily_spend: f64,
    pub days_remaining: u32,
    pub verdict: SpendVerdict,
    /// Month-end risk band once the amount is spent
    pub risk: RiskBand,
    /// Safe daily spend from tomorrow on, after this spend
    pub safe_tomorrow: f64,
    /// Days the balance lasts if this amount were spent every day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<u32>,
    pub message: String,
}

/// Check a one-off spend against the current month's safe daily spend
pub fn check_spend(transactions: &[Transaction], amount: f64, today: NaiveDate) -> Result<SpendCheck> {
    require_positive(amount, "Amount")?;

    let window = MonthWindow::for_day(today);
    let days_remaining = window.days_remaining;
    let month = totals(month_transactions(transactions, today));

    let balance = month.available_balance();
    let safe_daily_spend = balance / days_remaining as f64;
    let avg_daily_spend = month.expense / window.days_elapsed as f64;

    let remaining = balance - amount;
    let tomorrow_days = if days_remaining > 1 {
        days_remaining - 1
    } else {
        1
    };
    let safe_tomorrow = if remaining > 0.0 {
        remaining / tomorrow_days as f64
    } else {
        0.0
    };

    let risk = RiskBand::classify(
        survival_days(remaining.max(0.0), avg_daily_spend),
        days_remaining,
    );

    let (verdict, days_left, message) = if amount <= safe_daily_spend {
        (
            SpendVerdict::Safe,
            None,
            "You can spend this safely today.".to_string(),
        )
    } else if amount <= safe_daily_spend * CAUTION_MULTIPLIER {
        (
            SpendVerdict::Caution,
            None,
            "This will reduce your budget for tomorrow.".to_string(),
        )
    } else {
        let days_left = (balance / amount).floor() as u32;
        (
            SpendVerdict::NotRecommended,
            Some(days_left),
            format!(
                "Not recommended. This may cause you to run out of money in {} days.",
                days_left
            ),
        )
    };

    debug!(
        amount,
        safe_daily_spend,
        verdict = verdict.as_str(),
        "Spend checked"
    );

    Ok(SpendCheck {
        amount,
        available_balance: balance,
        safe_daily_spend,
        days_remaining,
        verdict,
        risk,
        safe_tomorrow,
        days_left,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{day, month_with};

    // June 10th: 10 days elapsed, 20 remaining
    fn june_10() -> NaiveDate {
        day(2024, 6, 10)
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let txs = month_with(10000.0, 1000.0, "2024-06");
        for price in [0.0, -50.0, f64::NAN] {
            let err = should_i_buy(&txs, price, june_10()).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
        assert!(should_i_buy(&[], 0.0, june_10()).is_err());
    }

    #[test]
    fn test_overdrawn_purchase_is_high_risk() {
        // balance 500, 100/day
        let txs = month_with(1500.0, 1000.0, "2024-06");
        let result = should_i_buy(&txs, 600.0, june_10()).unwrap();

        assert_eq!(result.current_balance, 500.0);
        assert_eq!(result.post_balance, -100.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.verdict, "Do NOT buy");
        assert_eq!(
            result.runout_message,
            "If you buy this, you will be out of money immediately."
        );
        assert_eq!(result.post_survival_days, 0.0);
        assert_eq!(result.days_short, 20);
        assert_eq!(result.safe_price, 0.0);
    }

    #[test]
    fn test_comfortable_purchase_is_low_risk() {
        // balance 9000 at 100/day, 20 days need 2000
        let txs = month_with(10000.0, 1000.0, "2024-06");
        let result = should_i_buy(&txs, 500.0, june_10()).unwrap();

        assert_eq!(result.post_balance, 8500.0);
        assert_eq!(result.post_survival_days, 85.0);
        assert_eq!(result.days_short, 0);
        assert_eq!(result.safe_price, 7000.0);
        // score before 50 + 27 - 2 = 75, after 50 + 25.5 - 2 = 73
        assert_eq!(result.stability_score_before, 75);
        assert_eq!(result.stability_score_after, 73);
        assert_eq!(result.stability_delta, -2);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(
            result.runout_message,
            "This purchase does not make you run out before month end."
        );
    }

    #[test]
    fn test_short_of_month_end_is_medium() {
        // balance 3000 at 100/day; buying 1150 leaves 18.5 days of 20
        let txs = month_with(4000.0, 1000.0, "2024-06");
        let result = should_i_buy(&txs, 1150.0, june_10()).unwrap();

        assert_eq!(result.post_survival_days, 18.5);
        assert_eq!(result.days_short, 2);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(
            result.runout_message,
            "If you buy this, you will run out of money 2 days before month end."
        );
    }

    #[test]
    fn test_short_survival_alone_is_high() {
        // balance 2000 at 100/day; 1500 left lasts 15 of 20 days, under the
        // 17-day line, while the score only drops 5
        let txs = month_with(3000.0, 1000.0, "2024-06");
        let result = should_i_buy(&txs, 500.0, june_10()).unwrap();

        assert_eq!(result.post_balance, 1500.0);
        assert_eq!(result.post_survival_days, 15.0);
        assert_eq!(result.stability_delta, -5);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_score_drop_alone_is_medium() {
        // 7000 left lasts 70 days, but the score falls 75 -> 69
        let txs = month_with(10000.0, 1000.0, "2024-06");
        let result = should_i_buy(&txs, 2000.0, june_10()).unwrap();

        assert_eq!(result.post_balance, 7000.0);
        assert_eq!(result.post_survival_days, 70.0);
        assert_eq!(result.stability_delta, -6);
        assert_eq!(result.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_large_score_drop_is_high() {
        // Plenty of runway, but spending most of the balance
        let txs = month_with(10000.0, 100.0, "2024-06");
        let result = should_i_buy(&txs, 9000.0, june_10()).unwrap();

        assert!(result.stability_delta < -15);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_no_spending_never_runs_out() {
        let txs = month_with(1000.0, 0.0, "2024-06");
        let result = should_i_buy(&txs, 200.0, june_10()).unwrap();

        assert_eq!(result.current_survival_days, NEVER_RUNS_OUT as f64);
        assert_eq!(result.post_survival_days, NEVER_RUNS_OUT as f64);
        assert_eq!(result.days_short, 0);
        assert_eq!(result.safe_price, 1000.0);
    }

    #[test]
    fn test_safe_price_rounds_down() {
        assert_eq!(safe_price(1234.0, 0.0, 10), 1200.0);
        assert_eq!(safe_price(1234.0, 50.0, 10), 700.0);
        assert_eq!(safe_price(-50.0, 0.0, 10), 0.0);
        assert_eq!(safe_price(49.0, 0.0, 10), 0.0);
    }

    #[test]
    fn test_item_name() {
        let txs = month_with(1000.0, 0.0, "2024-06");
        let result = should_i_buy(&txs, 200.0, june_10()).unwrap();
        assert_eq!(result.item_name, "Planned purchase");
        assert_eq!(result.clone().for_item("  ").item_name, "Planned purchase");
        assert_eq!(result.for_item("Headphones").item_name, "Headphones");
    }

    #[test]
    fn test_other_months_ignored() {
        let mut txs = month_with(1500.0, 1000.0, "2024-06");
        txs.extend(month_with(50000.0, 0.0, "2024-05"));
        let result = should_i_buy(&txs, 600.0, june_10()).unwrap();
        assert_eq!(result.current_balance, 500.0);
    }

    #[test]
    fn test_check_spend_tiers() {
        // available 2000 over 20 days: safe spend 100
        let txs = month_with(3000.0, 1000.0, "2024-06");

        let safe = check_spend(&txs, 100.0, june_10()).unwrap();
        assert_eq!(safe.verdict, SpendVerdict::Safe);
        assert_eq!(safe.safe_daily_spend, 100.0);
        assert_eq!(safe.safe_tomorrow, 100.0);

        let caution = check_spend(&txs, 150.0, june_10()).unwrap();
        assert_eq!(caution.verdict, SpendVerdict::Caution);

        let bad = check_spend(&txs, 400.0, june_10()).unwrap();
        assert_eq!(bad.verdict, SpendVerdict::NotRecommended);
        assert_eq!(bad.days_left, Some(5));
        assert_eq!(
            bad.message,
            "Not recommended. This may cause you to run out of money in 5 days."
        );
        // 1600 left at 100/day lasts 16 of 20 days
        assert_eq!(bad.risk, RiskBand::Danger);
    }

    #[test]
    fn test_check_spend_rejects_zero() {
        assert!(matches!(
            check_spend(&[], 0.0, june_10()),
            Err(Error::InvalidInput(_))
        ));
    }
}
