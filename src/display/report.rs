//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the expense, shared-expense and
//! dashboard views.

use crate::models::Money;
use crate::reports::{ChartSeries, MonthlyBreakdown};

/// Format a money amount with color hints for terminal display
pub fn format_money_colored(amount: Money) -> String {
    if amount.is_negative() {
        format!("\x1b[31m{}\x1b[0m", amount) // Red for negative
    } else if amount.is_positive() {
        format!("\x1b[32m{}\x1b[0m", amount) // Green for positive
    } else {
        amount.to_string()
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: Money, max_value: Money, width: usize) -> String {
    if !max_value.is_positive() || !value.is_positive() {
        return " ".repeat(width);
    }

    let ratio = value.cents() as f64 / max_value.cents() as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render a chart series as horizontal bars, one line per label
pub fn format_chart(series: &ChartSeries, width: usize) -> String {
    if series.is_empty() {
        return "No data.\n".to_string();
    }

    let max = series.values.iter().copied().max().unwrap_or_default();
    let total: Money = series.values.iter().sum();
    let label_width = series
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(24);

    let mut output = String::new();
    for (label, value) in series.iter() {
        let share = if total.is_positive() {
            value.cents() as f64 / total.cents() as f64 * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<lw$} {} {:>12} {:>6}\n",
            truncate(label, label_width),
            format_bar(value, max, width),
            value,
            format_percentage(share),
            lw = label_width
        ));
    }
    output
}

/// Format a monthly breakdown with its total
pub fn format_breakdown(year: i32, breakdown: &MonthlyBreakdown) -> String {
    let mut output = String::new();
    output.push_str(&format!("Monthly Breakdown: {}\n", year));
    output.push_str(&separator(50));
    output.push('\n');
    output.push_str(&format_chart(&breakdown.chart_series(), 20));
    output.push_str(&separator(50));
    output.push('\n');
    output.push_str(&format!("{:<20} {:>12}\n", "Total", breakdown.total()));
    output
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::chart_series;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(Money::from_cents(50), Money::from_cents(100), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);

        let empty = format_bar(Money::zero(), Money::zero(), 4);
        assert_eq!(empty, "    ");
    }

    #[test]
    fn test_format_chart() {
        let series = chart_series([
            ("Food", Money::from_cents(7500)),
            ("Rent", Money::from_cents(2500)),
        ]);
        let chart = format_chart(&series, 8);
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].contains("$75.00"));
        assert!(lines[0].contains("75%"));

        assert_eq!(format_chart(&ChartSeries::default(), 8), "No data.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }
}
