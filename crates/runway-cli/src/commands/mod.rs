//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Session resolution, ledger loading, JSON output, settings display
//! - `decision` - "Can I spend this?" and purchase simulation
//! - `entry` - Categorization and bank SMS parsing
//! - `insights` - Weekly insights and the monthly report
//! - `overview` - Dashboard, forecast, streak and score

pub mod core;
pub mod decision;
pub mod entry;
pub mod insights;
pub mod overview;

// Re-export command functions for main.rs
pub use self::core::*;
pub use decision::*;
pub use entry::*;
pub use insights::*;
pub use overview::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Horizontal bar for a 0..=1 fraction; values outside are clamped
pub fn bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
