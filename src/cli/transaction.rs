//! Transaction CLI commands
//!
//! Implements CLI commands for recording, editing and listing transactions.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::TrackerResult;
use crate::models::{parse_date, TransactionDraft, TransactionId, TransactionPatch};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today, parse_kind};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Transaction type (income or expense)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Amount (e.g., "20", "20.50" or "$20.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Account name
        #[arg(short, long)]
        account: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Edit an existing transaction
    Edit {
        /// Transaction ID
        id: u64,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New type (income or expense)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New account
        #[arg(short, long)]
        account: Option<String>,
        /// New note
        #[arg(short, long, conflicts_with = "clear_note")]
        note: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear_note: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: u64,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: u64,
    },
    /// List transactions
    List {
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by type (income or expense)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Show only the most recent N transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let mut service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            account,
            date,
            note,
        } => {
            let mut draft = TransactionDraft::new(
                parse_amount(&amount)?,
                parse_kind(&kind)?,
                parse_date_or_today(date.as_deref())?,
                category,
                account,
            );
            if let Some(note) = note {
                draft = draft.with_note(note);
            }

            let txn = service.create(draft)?;
            println!("Recorded transaction {}", txn.id);
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Edit {
            id,
            amount,
            kind,
            date,
            category,
            account,
            note,
            clear_note,
        } => {
            let patch = TransactionPatch {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                category,
                account,
                note: if clear_note { Some(None) } else { note.map(Some) },
            };

            let txn = service.update(TransactionId::new(id), &patch)?;
            println!("Updated transaction {}", txn.id);
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(TransactionId::new(id))?;
            println!("Deleted transaction {}", txn.id);
        }

        TransactionCommands::Show { id } => {
            let txn = service.get(TransactionId::new(id))?;
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::List {
            account,
            category,
            kind,
            from,
            to,
            limit,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(account) = account {
                filter = filter.account(account);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let (Some(from), Some(to)) = (from, to) {
                filter = filter.date_range(parse_date(&from)?, parse_date(&to)?);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = service.list(&filter);
            print!("{}", format_transaction_register(&transactions, symbol));
        }
    }

    Ok(())
}
