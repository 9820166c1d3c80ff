//! CSV export
//!
//! Writes transactions and accounts as spreadsheet-friendly CSV. Amounts are
//! plain decimals without a currency symbol.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::ledger::Ledger;
use crate::models::DATE_FORMAT;

/// Header row of the transaction export
pub const TRANSACTION_HEADER: [&str; 7] =
    ["ID", "Date", "Type", "Category", "Account", "Amount", "Note"];

/// Export every transaction in ledger order (date, then id)
pub fn export_transactions_csv<W: Write>(ledger: &Ledger, writer: W) -> TrackerResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(TRANSACTION_HEADER)
        .map_err(csv_error)?;

    for txn in ledger.transactions() {
        csv_writer
            .write_record([
                txn.id.value().to_string(),
                txn.date.format(DATE_FORMAT).to_string(),
                txn.kind.to_string(),
                txn.category.clone(),
                txn.account.clone(),
                txn.amount.to_decimal_string(),
                txn.note.clone().unwrap_or_default(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export accounts with their opening and current balances
pub fn export_accounts_csv<W: Write>(ledger: &Ledger, writer: W) -> TrackerResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Name", "Initial Balance", "Balance", "Transactions"])
        .map_err(csv_error)?;

    for account in ledger.accounts().list() {
        let count = ledger.filter_by_account(&account.name).count();
        csv_writer
            .write_record([
                account.name.clone(),
                account.initial_balance.to_decimal_string(),
                account.balance.to_decimal_string(),
                count.to_string(),
            ])
            .map_err(csv_error)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn csv_error(e: ::csv::Error) -> TrackerError {
    TrackerError::Io(format!("Failed to write CSV: {}", e))
}
