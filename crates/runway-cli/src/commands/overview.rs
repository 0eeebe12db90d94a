//! Month overview commands: dashboard, forecast, streak, score

use anyhow::Result;
use runway_core::{dashboard, month_forecast, stability_score, streak, ForecastResult, RiskBand};
use serde::Serialize;

use super::core::{print_json, Session};
use super::{bar, truncate};

fn band_icon(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Danger => "🔴",
        RiskBand::Warning => "🟡",
        RiskBand::Safe => "🟢",
    }
}

fn print_forecast(session: &Session, forecast: &ForecastResult) {
    println!(
        "   {} {} ({})",
        band_icon(forecast.risk),
        forecast.message,
        forecast.risk
    );
    println!(
        "   Burning {} a day; money lasts {} days, {} days left in the month",
        session.money(forecast.avg_daily_spend),
        forecast.forecast_days,
        forecast.days_remaining
    );
}

pub fn cmd_dashboard(session: &Session) -> Result<()> {
    let transactions = session.transactions()?;
    let summary = dashboard(&transactions, session.today);

    if session.json {
        return print_json(&summary);
    }

    let settings = &session.settings;
    println!();
    println!("📊 Runway Dashboard ({})", summary.today);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income this month:   {:>12}", session.money(summary.month_income));
    println!("   Spent this month:    {:>12}", session.money(summary.month_expense));
    println!("   Balance:             {:>12}", session.money(summary.current_balance));
    println!(
        "   Safe to spend today: {:>12}  ({} days left)",
        session.money(summary.safe_daily_spend),
        summary.remaining_days
    );
    println!("   Stability score:     {:>12}", format!("{}/100", summary.financial_score));
    println!("   No-spend streak:     {:>12}", format!("{} days", summary.streak));

    if settings.monthly_budget > 0.0 {
        let used = summary.month_expense / settings.monthly_budget;
        println!(
            "   Budget used:         {} {:>5.1}% of {}",
            bar(used, 20),
            used * 100.0,
            session.money(settings.monthly_budget)
        );
    }
    if settings.savings_goal > 0.0 {
        let saved = summary.current_balance.max(0.0) / settings.savings_goal;
        println!(
            "   Savings goal:        {} {:>5.1}% of {}",
            bar(saved, 20),
            saved.min(1.0) * 100.0,
            session.money(settings.savings_goal)
        );
    }

    println!();
    print_forecast(session, &summary.forecast);

    if !summary.category_totals.is_empty() {
        println!();
        println!("   Spending by category");
        for (category, amount) in summary.category_totals.iter() {
            println!("   {:20} {:>12}", truncate(category, 20), session.money(amount));
        }
    }

    println!();
    println!("💡 Suggestions");
    for suggestion in &summary.suggestions {
        println!("   • {}", suggestion);
    }

    if !summary.recent_transactions.is_empty() {
        println!();
        println!("   Recent transactions");
        println!("   ──────────────────────────────────────────────────────");
        for tx in &summary.recent_transactions {
            let sign = if tx.is_income() { "+" } else { "-" };
            println!(
                "   {} │ {:14} │ {}{:>10} │ {}",
                tx.date,
                truncate(&tx.category, 14),
                sign,
                session.money(tx.amount),
                truncate(tx.description.as_deref().unwrap_or(""), 24)
            );
        }
    }

    Ok(())
}

pub fn cmd_forecast(session: &Session) -> Result<()> {
    let transactions = session.transactions()?;
    let forecast = month_forecast(&transactions, session.today);

    if session.json {
        return print_json(&forecast);
    }

    println!();
    println!("📈 Forecast to month end");
    println!("   ─────────────────────────────────────────────");
    println!("   Available:      {}", session.money(forecast.available_balance));
    println!("   Safe per day:   {}", session.money(forecast.safe_daily_spend));
    print_forecast(session, &forecast);

    println!();
    let start = forecast.curve.first().map_or(0.0, |p| p.balance);
    for point in &forecast.curve {
        let fraction = if start > 0.0 { point.balance / start } else { 0.0 };
        println!(
            "   Day {:>2} {} {:>12}",
            point.day,
            bar(fraction, 30),
            session.money(point.balance)
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct StreakOutput {
    today: chrono::NaiveDate,
    streak: u32,
}

pub fn cmd_streak(session: &Session) -> Result<()> {
    let transactions = session.transactions()?;
    let days = streak(&transactions, session.today);

    if session.json {
        return print_json(&StreakOutput {
            today: session.today,
            streak: days,
        });
    }

    if days == 0 {
        println!("🔥 No streak yet. A day without spending starts one.");
    } else {
        println!("🔥 {} day no-spend streak", days);
    }

    Ok(())
}

#[derive(Serialize)]
struct ScoreOutput {
    income: f64,
    expense: f64,
    available_balance: f64,
    score: u8,
}

pub fn cmd_score(
    session: &Session,
    income: f64,
    expense: f64,
    balance: Option<f64>,
) -> Result<()> {
    if income < 0.0 || expense < 0.0 {
        anyhow::bail!("Income and expense must not be negative");
    }
    let available_balance = balance.unwrap_or(income - expense).max(0.0);
    let score = stability_score(income, expense, available_balance);

    if session.json {
        return print_json(&ScoreOutput {
            income,
            expense,
            available_balance,
            score,
        });
    }

    println!("🧮 Stability score: {}/100 {}", score, bar(score as f64 / 100.0, 20));

    Ok(())
}
