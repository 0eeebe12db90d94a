//! Quick-entry helpers: categorization and SMS parsing

use anyhow::Result;
use runway_core::{auto_categorize, parse_message};
use serde::Serialize;

use super::core::{print_json, Session};

#[derive(Serialize)]
struct CategoryOutput<'a> {
    description: &'a str,
    category: &'static str,
}

pub fn cmd_categorize(session: &Session, description: &str) -> Result<()> {
    let category = auto_categorize(description);

    if session.json {
        return print_json(&CategoryOutput {
            description,
            category,
        });
    }

    println!("🏷️  {} → {}", description, category);
    Ok(())
}

pub fn cmd_parse_message(session: &Session, text: &str) -> Result<()> {
    let Some(tx) = parse_message(text, session.today) else {
        anyhow::bail!("No amount found in message (expected e.g. \"Rs. 250\" or \"₹250\")");
    };

    if session.json {
        return print_json(&tx);
    }

    println!("📩 Parsed transaction");
    println!("   Date:        {}", tx.date);
    println!("   Type:        {}", tx.kind);
    println!("   Category:    {}", tx.category);
    println!("   Amount:      {}", session.money(tx.amount));
    if let Some(description) = &tx.description {
        println!("   Description: {}", description);
    }

    Ok(())
}
