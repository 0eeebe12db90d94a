//! Spending decision commands

use anyhow::{Context, Result};
use runway_core::{check_spend, should_i_buy, RiskLevel, SpendVerdict};

use super::core::{print_json, Session};

pub fn cmd_check(session: &Session, amount: f64) -> Result<()> {
    let transactions = session.transactions()?;
    let check = check_spend(&transactions, amount, session.today)
        .context("Failed to check spend")?;

    if session.json {
        return print_json(&check);
    }

    let icon = match check.verdict {
        SpendVerdict::Safe => "✅",
        SpendVerdict::Caution => "⚠️ ",
        SpendVerdict::NotRecommended => "❌",
    };

    println!();
    println!("{} {}", icon, check.message);
    println!("   ─────────────────────────────────────────────");
    println!("   Spending:          {}", session.money(check.amount));
    println!("   Safe today:        {}", session.money(check.safe_daily_spend));
    println!("   Safe from tomorrow: {}", session.money(check.safe_tomorrow));
    println!("   Month-end outlook: {}", check.risk);

    Ok(())
}

pub fn cmd_buy(session: &Session, price: f64, item: Option<&str>) -> Result<()> {
    let transactions = session.transactions()?;
    let mut result = should_i_buy(&transactions, price, session.today)
        .context("Failed to simulate purchase")?;
    if let Some(item) = item {
        result = result.for_item(item);
    }

    if session.json {
        return print_json(&result);
    }

    let icon = match result.risk_level {
        RiskLevel::High => "🛑",
        RiskLevel::Medium => "⚠️ ",
        RiskLevel::Low => "✅",
    };

    println!();
    println!(
        "🛒 {} for {}",
        result.item_name,
        session.money(result.price)
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:22} {:>14} {:>14}", "", "Now", "After");
    println!(
        "   {:22} {:>14} {:>14}",
        "Balance",
        session.money(result.current_balance),
        session.money(result.post_balance)
    );
    println!(
        "   {:22} {:>14} {:>14}",
        "Safe per day",
        session.money(result.current_safe_daily),
        session.money(result.post_safe_daily)
    );
    println!(
        "   {:22} {:>14.1} {:>14.1}",
        "Days money lasts", result.current_survival_days, result.post_survival_days
    );
    println!(
        "   {:22} {:>14} {:>14}",
        "Stability score", result.stability_score_before, result.stability_score_after
    );
    println!();
    println!(
        "   {} {} (risk {}, score {:+})",
        icon, result.verdict, result.risk_level, result.stability_delta
    );
    println!("   {}", result.runout_message);
    if result.safe_price > 0.0 && result.safe_price < result.price {
        println!(
            "   You could spend up to {} and still last the month.",
            session.money(result.safe_price)
        );
    }

    Ok(())
}
