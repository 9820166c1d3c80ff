//! Filter CLI commands
//!
//! Quick single-criterion views over the transaction list.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::format_transaction_register;
use crate::error::TrackerResult;
use crate::models::Transaction;
use crate::storage::Storage;

use super::parse_kind;

/// Filter subcommands
#[derive(Subcommand)]
pub enum FilterCommands {
    /// Transactions labelled with a category (income or expense)
    Category {
        /// Category name
        name: String,
    },
    /// Transactions posted to an account
    Account {
        /// Account name
        name: String,
    },
    /// Transactions of one type
    Type {
        /// income or expense
        #[arg(value_name = "TYPE")]
        kind: String,
    },
}

/// Handle a filter command
pub fn handle_filter_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FilterCommands,
) -> TrackerResult<()> {
    let ledger = storage.ledger();

    let matching: Vec<Transaction> = match cmd {
        FilterCommands::Category { name } => ledger.filter_by_category(&name).cloned().collect(),
        FilterCommands::Account { name } => ledger.filter_by_account(&name).cloned().collect(),
        FilterCommands::Type { kind } => ledger.filter_by_kind(parse_kind(&kind)?).cloned().collect(),
    };

    print!(
        "{}",
        format_transaction_register(&matching, &settings.currency_symbol)
    );
    Ok(())
}
