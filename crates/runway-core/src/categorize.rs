//! Keyword categorization and quick entry
//!
//! Heuristics the entry forms use before a transaction reaches the engine:
//! guessing a category from a free-text description, and pulling an amount
//! and direction out of a pasted bank SMS.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind, DATE_FORMAT};

pub const DEFAULT_CATEGORY: &str = "Others";

/// Description keywords per category, checked in this order
const DESCRIPTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food",
        &["swiggy", "zomato", "dominos", "mcdonalds", "cafe", "coffee"],
    ),
    ("Travel", &["uber", "ola", "rapido", "metro", "bus", "train"]),
    (
        "Shopping",
        &["amazon", "flipkart", "myntra", "zara", "h&m"],
    ),
    ("Recharge", &["jio", "airtel", "vi", "wifi", "internet"]),
    ("Fees", &["fees", "college", "tuition", "library", "exam"]),
    (
        "Entertainment",
        &["movie", "netflix", "spotify", "steam"],
    ),
];

/// SMS keywords per category; income is checked first since it flips the
/// transaction's direction
const MESSAGE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Income", &["scholarship", "salary", "received", "credited"]),
    ("Food", &["swiggy", "zomato", "food", "lunch", "tea"]),
    ("Travel", &["bus", "uber", "ola", "travel"]),
    ("Bills", &["recharge", "jio", "airtel", "bill"]),
];

type Matchers = Vec<(&'static str, Regex)>;

/// Case-insensitive whole-word matcher for each category
fn build_matchers(table: &'static [(&'static str, &'static [&'static str])]) -> Matchers {
    table
        .iter()
        .map(|(category, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)(?:^|[^a-z0-9])(?:{})(?:$|[^a-z0-9])", alternation);
            (*category, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
}

fn description_matchers() -> &'static Matchers {
    static MATCHERS: OnceLock<Matchers> = OnceLock::new();
    MATCHERS.get_or_init(|| build_matchers(DESCRIPTION_KEYWORDS))
}

fn message_matchers() -> &'static Matchers {
    static MATCHERS: OnceLock<Matchers> = OnceLock::new();
    MATCHERS.get_or_init(|| build_matchers(MESSAGE_KEYWORDS))
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:rs\.?|₹|inr)\s*(\d+(?:\.\d+)?)").expect("valid regex")
    })
}

fn first_match(matchers: &'static Matchers, text: &str) -> Option<&'static str> {
    matchers
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(category, _)| *category)
}

/// Guess a category from a description, `Others` when nothing matches
pub fn auto_categorize(description: &str) -> &'static str {
    first_match(description_matchers(), description).unwrap_or(DEFAULT_CATEGORY)
}

/// Expense dated today, categorized from its description
pub fn quick_expense(amount: f64, description: &str, today: NaiveDate) -> Result<Transaction> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "Amount must be greater than zero, got {}",
            amount
        )));
    }

    let category = auto_categorize(description);
    debug!(category, "Quick expense categorized");

    Ok(
        Transaction::expense(amount, category, today.format(DATE_FORMAT).to_string())
            .with_description(description),
    )
}

/// Build a transaction from a bank SMS such as
/// "Rs. 250 debited for Swiggy order".
///
/// Returns None when no positive amount can be found.
pub fn parse_message(message: &str, today: NaiveDate) -> Option<Transaction> {
    let text = message.to_lowercase();

    let amount = amount_pattern()
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|amount| *amount > 0.0)?;

    let category = first_match(message_matchers(), &text).unwrap_or(DEFAULT_CATEGORY);
    let kind = if category == "Income" {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let snippet: String = text.chars().take(20).collect();
    debug!(amount, category, "Parsed message");

    Some(
        Transaction::new(kind, amount, category, today.format(DATE_FORMAT).to_string())
            .with_description(format!("Smart Import: {}...", snippet)),
    )
}
