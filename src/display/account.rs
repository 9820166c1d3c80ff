//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::services::AccountSummary;

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Opening")]
    opening: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Transactions")]
    transactions: usize,
}

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let rows = summaries.iter().map(|s| AccountRow {
        name: s.account.name.clone(),
        opening: s.account.initial_balance.format_with_symbol(symbol),
        balance: s.account.balance.format_with_symbol(symbol),
        transactions: s.transaction_count,
    });

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::new(1..), Alignment::right());

    let total: Money = summaries.iter().map(|s| s.account.balance).sum();

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!("Total balance: {}\n", total.format_with_symbol(symbol)));
    output
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary, symbol: &str) -> String {
    let account = &summary.account;
    let activity = account.balance - account.initial_balance;

    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!(
        "  Opening Balance:  {}\n",
        account.initial_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Net Activity:     {}\n",
        activity.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Current Balance:  {}\n",
        account.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Transactions:     {}\n",
        summary.transaction_count
    ));
    output
}
