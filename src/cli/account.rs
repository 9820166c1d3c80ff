//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::TrackerResult;
use crate::services::AccountService;
use crate::storage::Storage;

use super::parse_amount;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Initial balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// Rename an account
    Rename {
        /// Current account name
        name: String,
        /// New name
        new_name: String,
    },
    /// Delete an account
    Delete {
        /// Account name
        name: String,
    },
    /// Show one account's balance, or the total across all accounts
    Balance {
        /// Account name
        name: Option<String>,
    },
    /// List all accounts
    List,
}

/// Handle an account command
pub fn handle_account_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> TrackerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let policy = settings.account_deletion;
    let mut service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create { name, balance } => {
            let account = service.create(&name, parse_amount(&balance)?)?;

            println!("Created account: {}", account.name);
            println!(
                "  Initial Balance: {}",
                account.initial_balance.format_with_symbol(symbol)
            );
        }

        AccountCommands::Rename { name, new_name } => {
            let account = service.rename(&name, &new_name)?;
            println!("Renamed account '{}' to '{}'", name.trim(), account.name);
        }

        AccountCommands::Delete { name } => {
            let (account, removal) = service.delete(&name)?;

            println!("Deleted account: {}", account.name);
            if !removal.cascaded.is_empty() {
                println!(
                    "  Removed {} transaction(s) ({} policy)",
                    removal.cascaded.len(),
                    policy
                );
            }
            if removal.orphaned > 0 {
                println!(
                    "  Kept {} transaction(s) referencing the deleted account",
                    removal.orphaned
                );
            }
        }

        AccountCommands::Balance { name: Some(name) } => {
            let summary = service.summary(&name)?;
            print!("{}", format_account_details(&summary, symbol));
        }

        AccountCommands::Balance { name: None } => {
            println!(
                "Total balance: {}",
                service.total_balance().format_with_symbol(symbol)
            );
        }

        AccountCommands::List => {
            let summaries = service.list_with_counts();
            print!("{}", format_account_list(&summaries, symbol));
        }
    }

    Ok(())
}
