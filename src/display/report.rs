//! Report formatting for period summaries and category breakdowns

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::ledger::{CategoryBreakdown, Summary};
use crate::models::{Money, TransactionKind, DATE_FORMAT};

const BAR_WIDTH: usize = 20;

/// Format a period summary as a small report
pub fn format_summary(title: &str, summary: &Summary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", title));
    output.push_str(&format!(
        "{} to {}\n",
        summary.start.format(DATE_FORMAT),
        summary.end.format(DATE_FORMAT)
    ));
    output.push_str(&separator(32));
    output.push('\n');
    output.push_str(&format!(
        "Income:   {:>14}\n",
        summary.income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Expense:  {:>14}\n",
        summary.expense.format_with_symbol(symbol)
    ));
    output.push_str(&separator(32));
    output.push('\n');
    output.push_str(&format!(
        "Net:      {:>14}\n",
        summary.net.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Transactions: {}\n", summary.count));

    output
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format a category breakdown, largest amounts first
pub fn format_breakdown(kind: TransactionKind, breakdown: &CategoryBreakdown, symbol: &str) -> String {
    if breakdown.is_empty() {
        return format!("No {} categories in this range.\n", kind);
    }

    let total: Money = breakdown.values().copied().sum();
    let max = breakdown.values().map(|m| m.cents()).max().unwrap_or(0) as f64;

    let mut entries: Vec<(&String, &Money)> = breakdown.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let rows = entries.into_iter().map(|(name, amount)| {
        let pct = if total.is_zero() {
            0.0
        } else {
            amount.cents() as f64 / total.cents() as f64 * 100.0
        };
        BreakdownRow {
            category: name.clone(),
            amount: amount.format_with_symbol(symbol),
            share: format_percentage(pct),
            bar: format_bar(amount.cents() as f64, max, BAR_WIDTH),
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::new(1..3), Alignment::right());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!("Total {}: {}\n", kind, total.format_with_symbol(symbol)));
    output
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
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn separator(width: usize) -> String {
    "─".repeat(width)
}
