//! Financial stability score
//!
//! One formula, shared by the dashboard, the monthly report and the
//! purchase simulator.

/// Bounded 0-100 health score from income, expense and available balance.
///
/// With income logged, rewards the share of income still available and
/// penalizes the share spent. Without income, every 100 spent costs one
/// point from a neutral 50.
pub fn stability_score(total_income: f64, total_expense: f64, available_balance: f64) -> u8 {
    let score = if total_income > 0.0 {
        let savings_ratio = available_balance / total_income;
        let expense_ratio = total_expense / total_income;
        50.0 + savings_ratio * 30.0 - expense_ratio * 20.0
    } else {
        50.0 - total_expense / 100.0
    };

    score.trunc().clamp(0.0, 100.0) as u8
}
