//! No-spend streak
//!
//! Counts consecutive days without an expense, walking back from today.
//! Income never breaks a streak.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::Transaction;

/// Upper bound on how far back the walk goes
pub const MAX_STREAK_DAYS: u32 = 365;

/// Consecutive expense-free days ending today.
///
/// Today counts only if it has no expense. The walk stops at the first day
/// with an expense, before the earliest dated transaction, or after
/// `MAX_STREAK_DAYS`. Transactions with unparseable dates are ignored.
pub fn streak(transactions: &[Transaction], today: NaiveDate) -> u32 {
    let mut expense_days = HashSet::new();
    let mut earliest: Option<NaiveDate> = None;

    for tx in transactions {
        let Some(day) = tx.day() else {
            debug!(date = %tx.date, "Ignoring unparseable date in streak");
            continue;
        };
        earliest = Some(earliest.map_or(day, |e| e.min(day)));
        if tx.is_expense() {
            expense_days.insert(day);
        }
    }

    let Some(earliest) = earliest else {
        return 0;
    };

    let mut count = 0;
    let mut current = today;
    for _ in 0..MAX_STREAK_DAYS {
        if current < earliest || expense_days.contains(&current) {
            break;
        }
        count += 1;
        match current.pred_opt() {
            Some(previous) => current = previous,
            None => break,
        }
    }

    count
}
