//! Category CLI commands
//!
//! Implements CLI commands for income and expense categories.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::{format_category_list, format_category_tree};
use crate::error::TrackerResult;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::parse_kind;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category
    Add {
        /// Category type (income or expense)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Category name
        name: String,
    },
    /// Rename a category
    Rename {
        /// Category type (income or expense)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },
    /// Delete a category
    Delete {
        /// Category type (income or expense)
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Category name
        name: String,
    },
    /// List categories
    List {
        /// Only show categories of this type
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> TrackerResult<()> {
    let mut service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { kind, name } => {
            let category = service.add(&name, parse_kind(&kind)?)?;
            println!("Created category: {}", category);
        }

        CategoryCommands::Rename {
            kind,
            name,
            new_name,
        } => {
            let category = service.rename(&name, parse_kind(&kind)?, &new_name)?;
            println!("Renamed category '{}' to '{}'", name.trim(), category.name);
        }

        CategoryCommands::Delete { kind, name } => {
            let (category, removal) = service.delete(&name, parse_kind(&kind)?)?;

            println!("Deleted category: {}", category);
            if !removal.cascaded.is_empty() {
                println!(
                    "  Removed {} transaction(s) ({} policy)",
                    removal.cascaded.len(),
                    settings.category_deletion
                );
            }
            if removal.orphaned > 0 {
                println!(
                    "  Kept {} transaction(s) labelled with the deleted category",
                    removal.orphaned
                );
            }
        }

        CategoryCommands::List { kind: Some(kind) } => {
            let kind = parse_kind(&kind)?;
            print!("{}", format_category_list(&service.list(kind)));
        }

        CategoryCommands::List { kind: None } => {
            print!("{}", format_category_tree(&service.list_all()));
        }
    }

    Ok(())
}
