//! Domain models for Runway

use std::borrow::Borrow;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ledger date format. Dates must be zero-padded so string order matches
/// calendar order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Survival estimate used when nothing is being spent and money remains
pub const NEVER_RUNS_OUT: u32 = 999;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry, as handed over by the CRUD shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Always positive; direction comes from `kind`
    pub amount: f64,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// `YYYY-MM-DD`, kept as text so month membership is a prefix match
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            kind,
            date: date.into(),
            description: None,
        }
    }

    pub fn expense(amount: f64, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(TransactionKind::Expense, amount, category, date)
    }

    pub fn income(amount: f64, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, category, date)
    }

    /// Attach free-text description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Calendar day of this transaction, or None if the date does not parse
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Month membership by `YYYY-MM` prefix
    pub fn in_month(&self, prefix: &str) -> bool {
        self.date.starts_with(prefix)
    }
}

/// Parse a caller-supplied `YYYY-MM-DD` date
pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{}: {}", s, e)))
}

/// `YYYY-MM` prefix of the month containing `day`
pub fn month_prefix(day: NaiveDate) -> String {
    day.format("%Y-%m").to_string()
}

/// English day name, e.g. "Saturday"
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Where "today" sits inside its calendar month.
///
/// Both day counts are clamped to at least 1 so they can always be used
/// as denominators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub today: NaiveDate,
    pub days_in_month: u32,
    pub days_elapsed: u32,
    pub days_remaining: u32,
}

impl MonthWindow {
    pub fn for_day(today: NaiveDate) -> Self {
        let days_in_month = today
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31);
        let day = today.day();

        Self {
            today,
            days_in_month,
            days_elapsed: day.max(1),
            days_remaining: days_in_month.saturating_sub(day).max(1),
        }
    }

    pub fn prefix(&self) -> String {
        month_prefix(self.today)
    }
}

/// Insertion-ordered sums keyed by label.
///
/// The leader is the largest sum; ties go to the key seen first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedTotals<K> {
    entries: Vec<(K, f64)>,
}

impl<K> Default for OrderedTotals<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> OrderedTotals<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K, amount: f64) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((key, amount)),
        }
    }

    /// Sum for `key`, zero when never seen
    pub fn get<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, total)| *total)
            .unwrap_or(0.0)
    }

    pub fn leader(&self) -> Option<(&K, f64)> {
        let mut best: Option<(&K, f64)> = None;
        for (key, total) in &self.entries {
            match best {
                Some((_, top)) if *total <= top => {}
                _ => best = Some((key, *total)),
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expense per weekday, always all seven slots, Monday first
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekdayTotals([f64; 7]);

impl WeekdayTotals {
    pub const ORDER: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn add(&mut self, day: Weekday, amount: f64) {
        self.0[day.num_days_from_monday() as usize] += amount;
    }

    pub fn get(&self, day: Weekday) -> f64 {
        self.0[day.num_days_from_monday() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, f64)> + '_ {
        Self::ORDER.iter().map(move |day| (*day, self.get(*day)))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn weekend_total(&self) -> f64 {
        self.get(Weekday::Sat) + self.get(Weekday::Sun)
    }

    /// Heaviest weekday, Monday-first on ties; None when nothing was spent
    pub fn leader(&self) -> Option<(Weekday, f64)> {
        if self.total() <= 0.0 {
            return None;
        }
        let mut best = (Weekday::Mon, self.get(Weekday::Mon));
        for (day, total) in self.iter().skip(1) {
            if total > best.1 {
                best = (day, total);
            }
        }
        Some(best)
    }
}

/// One bar of a per-day chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub label: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(matches!(parse_day("2023-02-29"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_day("15/03/2024"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_kind_round_trip_names() {
        assert_eq!(TransactionKind::Income.as_str(), "income");
        assert_eq!(
            "Expense".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_transaction_day_parsing() {
        let ok = Transaction::expense(10.0, "Food", "2024-03-09");
        assert_eq!(ok.day(), Some(date(2024, 3, 9)));

        let bad = Transaction::expense(10.0, "Food", "09/03/2024");
        assert_eq!(bad.day(), None);
        assert!(!bad.in_month("2024-03"));
    }

    #[test]
    fn test_transaction_json_uses_type_field() {
        let tx: Transaction = serde_json::from_str(
            r#"{"amount": 250.0, "category": "Food", "type": "expense", "date": "2024-03-09"}"#,
        )
        .unwrap();
        assert!(tx.is_expense());
        assert_eq!(tx.description, None);
    }

    #[test]
    fn test_month_window_mid_month() {
        let window = MonthWindow::for_day(date(2024, 2, 10));
        assert_eq!(window.days_in_month, 29);
        assert_eq!(window.days_elapsed, 10);
        assert_eq!(window.days_remaining, 19);
        assert_eq!(window.prefix(), "2024-02");
    }

    #[test]
    fn test_month_window_last_day_clamps_remaining() {
        let window = MonthWindow::for_day(date(2023, 12, 31));
        assert_eq!(window.days_in_month, 31);
        assert_eq!(window.days_remaining, 1);
    }

    #[test]
    fn test_ordered_totals_leader_ties_first_seen() {
        let mut totals = OrderedTotals::new();
        totals.add("Travel".to_string(), 300.0);
        totals.add("Food".to_string(), 200.0);
        totals.add("Food".to_string(), 100.0);

        let (leader, amount) = totals.leader().unwrap();
        assert_eq!(leader, "Travel");
        assert_eq!(amount, 300.0);
        assert_eq!(totals.get("Food"), 300.0);
        assert_eq!(totals.get("Shopping"), 0.0);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_weekday_totals_has_all_days() {
        let mut totals = WeekdayTotals::default();
        totals.add(Weekday::Sun, 50.0);
        totals.add(Weekday::Sat, 50.0);

        assert_eq!(totals.iter().count(), 7);
        assert_eq!(totals.weekend_total(), 100.0);
        // Saturday comes before Sunday in the fixed order
        assert_eq!(totals.leader(), Some((Weekday::Sat, 50.0)));
        assert_eq!(WeekdayTotals::default().leader(), None);
    }
}
