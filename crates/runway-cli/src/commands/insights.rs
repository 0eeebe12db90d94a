//! Insight command implementations

use anyhow::Result;
use runway_core::aggregate::{month_transactions, totals};
use runway_core::models::weekday_name;
use runway_core::{monthly_report, suggestions, weekly_insights, Suggestion, WeeklyInsights};
use serde::Serialize;

use super::core::{print_json, Session};
use super::{bar, truncate};

#[derive(Serialize)]
struct InsightsOutput {
    weekly_insights: Option<WeeklyInsights>,
    suggestions: Vec<Suggestion>,
}

fn print_suggestions(session: &Session, advice: &[Suggestion]) {
    println!("💡 Suggestions");
    for suggestion in advice {
        match suggestion.savings {
            Some(savings) => println!(
                "   • {}  (saves ~{})",
                suggestion,
                session.money(savings)
            ),
            None => println!("   • {}", suggestion),
        }
    }
}

pub fn cmd_insights(session: &Session) -> Result<()> {
    let transactions = session.transactions()?;
    let week = weekly_insights(&transactions, session.today);

    let month = totals(month_transactions(&transactions, session.today));
    let advice = suggestions(week.as_ref(), month.expense);

    if session.json {
        return print_json(&InsightsOutput {
            weekly_insights: week,
            suggestions: advice,
        });
    }

    println!();
    println!("🗓️  Last 7 days");
    println!("   ─────────────────────────────────────────────");

    match &week {
        None => println!("   No expenses logged this week."),
        Some(week) => {
            println!("   Spent:        {}", session.money(week.total_spent));
            println!("   Transactions: {}", week.transaction_count);
            println!("   Per day:      {}", session.money(week.avg_daily_spent));
            println!("   Top category: {}", week.highest_category);
            if let Some(day) = week.expensive_day {
                println!("   Costliest day: {}", weekday_name(day));
            }
            println!();
            for (category, amount) in week.categories.iter() {
                println!(
                    "   {:16} {} {:>10}",
                    truncate(category, 16),
                    bar(week.category_share(category), 20),
                    session.money(amount)
                );
            }
        }
    }

    println!();
    print_suggestions(session, &advice);

    Ok(())
}

pub fn cmd_report(session: &Session) -> Result<()> {
    let transactions = session.transactions()?;
    let report = monthly_report(&transactions, session.today);

    if session.json {
        return print_json(&report);
    }

    println!();
    println!("📒 Monthly Report ({})", session.today.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income (all time):  {}", session.money(report.income_total));
    println!("   Spent (all time):   {}", session.money(report.expense_total));
    println!("   Stability score:    {}/100", report.stability_score);
    println!("   No-spend streak:    {} days", report.streak);
    println!();
    println!("   {}", report.survival_message);
    println!(
        "   Money lasts {} days; {} days left in the month",
        report.survival_days, report.remaining_days_in_month
    );

    let total = report.category_totals.total();
    if total > 0.0 {
        println!();
        println!("   {:16} │ {:>10} │ {:>6}", "Category", "Amount", "%");
        println!("   ─────────────────┼────────────┼───────");
        for (category, amount) in report.category_totals.iter() {
            println!(
                "   {:16} │ {:>10.2} │ {:>5.1}%",
                truncate(category, 16),
                amount,
                amount / total * 100.0
            );
        }
    }

    let weekday_total = report.weekday_totals.total();
    if weekday_total > 0.0 {
        println!();
        for (day, amount) in report.weekday_totals.iter() {
            println!(
                "   {:10} {} {:>10}",
                weekday_name(day),
                bar(amount / weekday_total, 20),
                session.money(amount)
            );
        }
    }

    println!();
    println!("🔎 Behaviour");
    for note in &report.behaviour_insights {
        println!("   • {}", note);
    }

    println!();
    print_suggestions(session, &report.smart_rules);

    Ok(())
}
