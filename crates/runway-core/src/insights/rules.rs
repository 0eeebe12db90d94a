//! Advice rules
//!
//! Each rule is a named function from some context to an optional
//! suggestion. A `RuleSet` evaluates its rules in registration order and
//! every rule fires independently of the others.
//!
//! The weekly set runs over `WeeklyInsights`, the monthly set over
//! `MonthlyContext`. They share no thresholds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Suggestion, SuggestionKind, WeeklyInsights};
use crate::models::is_weekend;

/// A single predicate-to-message rule
pub struct Rule<C> {
    pub kind: SuggestionKind,
    pub evaluate: fn(&C) -> Option<Suggestion>,
}

/// Ordered rules plus the message used when none of them fire
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
    fallback: fn(&C) -> Suggestion,
}

impl<C> RuleSet<C> {
    pub fn new(fallback: fn(&C) -> Suggestion) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    pub fn register(&mut self, kind: SuggestionKind, evaluate: fn(&C) -> Option<Suggestion>) {
        self.rules.push(Rule { kind, evaluate });
    }

    /// Run every rule in order; the fallback only when nothing fired
    pub fn evaluate(&self, ctx: &C) -> Vec<Suggestion> {
        let mut fired = Vec::new();
        for rule in &self.rules {
            if let Some(suggestion) = (rule.evaluate)(ctx) {
                debug_assert_eq!(
                    suggestion.kind, rule.kind,
                    "rule registered under a different kind than it emits"
                );
                debug!(rule = rule.kind.as_str(), "Advice rule fired");
                fired.push(suggestion);
            }
        }

        if fired.is_empty() {
            fired.push((self.fallback)(ctx));
        }
        fired
    }

    pub fn kinds(&self) -> Vec<SuggestionKind> {
        self.rules.iter().map(|r| r.kind).collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ========== Weekly rules ==========

pub const FOOD_SHARE_LIMIT: f64 = 0.40;
pub const TRAVEL_SHARE_LIMIT: f64 = 0.30;
pub const SHOPPING_SHARE_LIMIT: f64 = 0.25;
pub const WEEKLY_TRANSACTION_LIMIT: usize = 10;

fn cook_at_home(week: &WeeklyInsights) -> Option<Suggestion> {
    if week.category_share("Food") <= FOOD_SHARE_LIMIT {
        return None;
    }
    let savings = round2(week.categories.get("Food") * 0.3);
    Some(
        Suggestion::new(
            SuggestionKind::CookAtHome,
            format!("🍔 Cooking at home 2 times this week could save ₹{}", savings),
        )
        .with_savings(savings),
    )
}

fn cheaper_transit(week: &WeeklyInsights) -> Option<Suggestion> {
    if week.category_share("Travel") <= TRAVEL_SHARE_LIMIT {
        return None;
    }
    let savings = round2(week.categories.get("Travel") * 0.4);
    Some(
        Suggestion::new(
            SuggestionKind::CheaperTransit,
            format!("🚌 Using bus instead of auto 3 times could save ₹{}", savings),
        )
        .with_savings(savings),
    )
}

fn micro_spending(week: &WeeklyInsights) -> Option<Suggestion> {
    (week.transaction_count > WEEKLY_TRANSACTION_LIMIT).then(|| {
        Suggestion::new(
            SuggestionKind::MicroSpending,
            "⚠️ High transaction frequency detected. Beware of micro-spending leaks.",
        )
    })
}

fn weekend_spending(week: &WeeklyInsights) -> Option<Suggestion> {
    week.expensive_day.filter(|day| is_weekend(*day)).map(|_| {
        Suggestion::new(
            SuggestionKind::WeekendSpending,
            "⚠️ High weekend spending detected. Consider planning weekend budgets in advance.",
        )
    })
}

fn online_shopping(week: &WeeklyInsights) -> Option<Suggestion> {
    (week.category_share("Shopping") > SHOPPING_SHARE_LIMIT).then(|| {
        Suggestion::new(
            SuggestionKind::OnlineShopping,
            "🛍️ Reduce online shopping orders this week to protect your budget.",
        )
    })
}

fn well_balanced(_: &WeeklyInsights) -> Suggestion {
    Suggestion::new(
        SuggestionKind::WellBalanced,
        "✨ Great job! Your spending categories look well-balanced this week.",
    )
}

/// Advice over the trailing week, in fixed order
pub fn weekly_rules() -> RuleSet<WeeklyInsights> {
    let mut rules = RuleSet::new(well_balanced);
    rules.register(SuggestionKind::CookAtHome, cook_at_home);
    rules.register(SuggestionKind::CheaperTransit, cheaper_transit);
    rules.register(SuggestionKind::MicroSpending, micro_spending);
    rules.register(SuggestionKind::WeekendSpending, weekend_spending);
    rules.register(SuggestionKind::OnlineShopping, online_shopping);
    rules
}

// ========== Monthly rules ==========

pub const MONTHLY_WEEKEND_SHARE_LIMIT: f64 = 0.30;
pub const MONTHLY_TRANSACTION_LIMIT: usize = 15;

/// Figures the monthly advice works from, all current-month expense
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyContext {
    pub expense: f64,
    pub food_expense: f64,
    pub weekend_expense: f64,
    pub transaction_count: usize,
}

impl MonthlyContext {
    fn share(&self, part: f64) -> f64 {
        if self.expense > 0.0 {
            part / self.expense
        } else {
            0.0
        }
    }
}

fn monthly_cooking(month: &MonthlyContext) -> Option<Suggestion> {
    if month.share(month.food_expense) <= FOOD_SHARE_LIMIT {
        return None;
    }
    let savings = (month.food_expense * 0.3).trunc();
    Some(
        Suggestion::new(
            SuggestionKind::MonthlyCooking,
            format!("🍔 Cooking at home could save you ₹{} this month.", savings),
        )
        .with_savings(savings),
    )
}

fn monthly_weekend(month: &MonthlyContext) -> Option<Suggestion> {
    (month.share(month.weekend_expense) > MONTHLY_WEEKEND_SHARE_LIMIT).then(|| {
        Suggestion::new(
            SuggestionKind::MonthlyWeekend,
            "⚠️ High weekend spending detected. Carefully plan weekend outings.",
        )
    })
}

fn monthly_micro_spending(month: &MonthlyContext) -> Option<Suggestion> {
    (month.transaction_count > MONTHLY_TRANSACTION_LIMIT).then(|| {
        Suggestion::new(
            SuggestionKind::MonthlyMicroSpending,
            "🛍️ Frequent micro-spending detected. Try consolidating purchases.",
        )
    })
}

fn healthy_habits(_: &MonthlyContext) -> Suggestion {
    Suggestion::new(
        SuggestionKind::HealthyHabits,
        "✨ Your spending habits are healthy! Keep it up.",
    )
}

/// Advice over the current month, independent of the weekly set
pub fn monthly_rules() -> RuleSet<MonthlyContext> {
    let mut rules = RuleSet::new(healthy_habits);
    rules.register(SuggestionKind::MonthlyCooking, monthly_cooking);
    rules.register(SuggestionKind::MonthlyWeekend, monthly_weekend);
    rules.register(SuggestionKind::MonthlyMicroSpending, monthly_micro_spending);
    rules
}
