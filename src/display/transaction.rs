//! Transaction display formatting
//!
//! Register tables and detail views for transactions.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, Transaction, TransactionKind, DATE_FORMAT};

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, symbol: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format(DATE_FORMAT).to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            account: txn.account.clone(),
            amount: txn.signed_amount().format_with_symbol(symbol),
            note: truncate(txn.note.as_deref().unwrap_or(""), 30),
        }
    }
}

/// Format a list of transactions as a register, with income and expense totals
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut table = Table::new(transactions.iter().map(|t| RegisterRow::new(t, symbol)));
    table
        .with(Style::sharp())
        .modify(Columns::single(5), Alignment::right());

    let (income, expense) = totals(transactions);

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s)  income {}  expense {}  net {}\n",
        transactions.len(),
        income.format_with_symbol(symbol),
        expense.format_with_symbol(symbol),
        (income - expense).format_with_symbol(symbol)
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format(DATE_FORMAT)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Account:     {}\n", txn.account));

    if let Some(note) = &txn.note {
        output.push_str(&format!("Note:        {}\n", note));
    }

    output
}

fn totals(transactions: &[Transaction]) -> (Money, Money) {
    transactions
        .iter()
        .fold((Money::zero(), Money::zero()), |(income, expense), txn| {
            match txn.kind {
                TransactionKind::Income => (income + txn.amount, expense),
                TransactionKind::Expense => (income, expense + txn.amount),
            }
        })
}

/// Truncate to `max_len` characters, marking the cut with "..."
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
