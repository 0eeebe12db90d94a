//! Core types for the insight and advice engine

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::OrderedTotals;

/// Which piece of advice a suggestion carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Weekly food share is high
    CookAtHome,
    /// Weekly travel share is high
    CheaperTransit,
    /// Many small weekly purchases
    MicroSpending,
    /// The heaviest weekday was on a weekend
    WeekendSpending,
    /// Weekly shopping share is high
    OnlineShopping,
    /// No weekly rule fired
    WellBalanced,
    /// Not enough recent data to say anything
    AddExpenses,
    /// Monthly food share is high
    MonthlyCooking,
    /// Monthly weekend share is high
    MonthlyWeekend,
    /// Many transactions this month
    MonthlyMicroSpending,
    /// No monthly rule fired
    HealthyHabits,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CookAtHome => "cook_at_home",
            Self::CheaperTransit => "cheaper_transit",
            Self::MicroSpending => "micro_spending",
            Self::WeekendSpending => "weekend_spending",
            Self::OnlineShopping => "online_shopping",
            Self::WellBalanced => "well_balanced",
            Self::AddExpenses => "add_expenses",
            Self::MonthlyCooking => "monthly_cooking",
            Self::MonthlyWeekend => "monthly_weekend",
            Self::MonthlyMicroSpending => "monthly_micro_spending",
            Self::HealthyHabits => "healthy_habits",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SuggestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cook_at_home" => Ok(Self::CookAtHome),
            "cheaper_transit" => Ok(Self::CheaperTransit),
            "micro_spending" => Ok(Self::MicroSpending),
            "weekend_spending" => Ok(Self::WeekendSpending),
            "online_shopping" => Ok(Self::OnlineShopping),
            "well_balanced" => Ok(Self::WellBalanced),
            "add_expenses" => Ok(Self::AddExpenses),
            "monthly_cooking" => Ok(Self::MonthlyCooking),
            "monthly_weekend" => Ok(Self::MonthlyWeekend),
            "monthly_micro_spending" => Ok(Self::MonthlyMicroSpending),
            "healthy_habits" => Ok(Self::HealthyHabits),
            _ => Err(format!("Unknown suggestion kind: {}", s)),
        }
    }
}

/// One piece of advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    /// Estimated amount saved by following the advice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
}

impl Suggestion {
    pub fn new(kind: SuggestionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            savings: None,
        }
    }

    pub fn with_savings(mut self, savings: f64) -> Self {
        self.savings = Some(savings);
        self
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Behavioral summary of the trailing week of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyInsights {
    pub total_spent: f64,
    pub transaction_count: usize,
    /// Total over the seven-day window, not per transaction
    pub avg_daily_spent: f64,
    pub highest_category: String,
    /// None when no transaction in the window had a parseable date
    pub expensive_day: Option<Weekday>,
    pub categories: OrderedTotals<String>,
    pub days: OrderedTotals<Weekday>,
}

impl WeeklyInsights {
    /// Share of the week's spend that went to `category`
    pub fn category_share(&self, category: &str) -> f64 {
        if self.total_spent > 0.0 {
            self.categories.get(category) / self.total_spent
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_kind_names() {
        assert_eq!(SuggestionKind::CookAtHome.as_str(), "cook_at_home");
        assert_eq!(
            SuggestionKind::from_str("healthy_habits").unwrap(),
            SuggestionKind::HealthyHabits
        );
        assert!(SuggestionKind::from_str("spend_more").is_err());
    }

    #[test]
    fn test_suggestion_builder() {
        let suggestion = Suggestion::new(SuggestionKind::CookAtHome, "Cook more").with_savings(300.0);
        assert_eq!(suggestion.to_string(), "Cook more");
        assert_eq!(suggestion.savings, Some(300.0));

        let json = serde_json::to_value(Suggestion::new(SuggestionKind::AddExpenses, "x")).unwrap();
        assert_eq!(json["kind"], "add_expenses");
        assert!(json.get("savings").is_none());
    }
}
