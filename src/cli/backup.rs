//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::{BackupManager, RestoreManager};
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::{Snapshot, Storage};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup of the current data
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Check a backup without restoring it
    Info {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,
    },

    /// Delete old backups according to the retention policy
    Prune {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "Backup")]
    filename: String,
    #[tabled(rename = "Created (UTC)")]
    created: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
}

/// Handle a backup command
pub fn handle_backup_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> TrackerResult<()> {
    let retention = settings.backup_retention.clone();
    let manager = BackupManager::new(storage.paths().clone(), retention.clone());

    match cmd {
        BackupCommands::Create => {
            let snapshot = Snapshot::from_ledger(storage.ledger());
            let (backup_path, pruned) = manager.create_backup_with_retention(&snapshot)?;
            println!("Backup created: {}", file_name(&backup_path));
            println!("Location: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups in {}", manager.backup_dir().display());
                println!("Create one with: money-tracker backup create");
                return Ok(());
            }

            let now = Utc::now();
            let rows = backups.iter().map(|b| BackupRow {
                filename: b.filename.clone(),
                created: b.created_at.format("%Y-%m-%d %H:%M").to_string(),
                age: format_duration(now.signed_duration_since(b.created_at)),
                size: format_size(b.size_bytes),
                kind: if b.is_monthly { "monthly" } else { "daily" },
            });

            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{}", table);

            if verbose {
                println!("Directory: {}", manager.backup_dir().display());
                println!(
                    "Retention: {} daily, {} monthly",
                    retention.daily_count, retention.monthly_count
                );
            }
            println!("{} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let restore_manager = RestoreManager::new(storage.paths().clone());
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!(
                "{} (taken {})",
                file_name(&backup_path),
                validation.backup_date.format("%Y-%m-%d %H:%M UTC")
            );
            println!("{}", validation.summary());

            if !validation.is_valid {
                return Err(TrackerError::Validation(format!(
                    "Refusing to restore {}",
                    file_name(&backup_path)
                )));
            }

            if !force {
                println!("Restoring replaces every account, category and transaction.");
                println!("Run 'money-tracker backup restore {} --force' to continue.", backup);
                return Ok(());
            }

            let pre_restore = manager.create_backup(&Snapshot::from_ledger(storage.ledger()))?;
            println!("Current data saved to: {}", file_name(&pre_restore));

            let result = restore_manager.restore_from_file(&backup_path)?;
            storage.reload()?;

            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;
            let validation = RestoreManager::new(storage.paths().clone())
                .validate_backup(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Path:         {}", backup_path.display());
            println!("Size:         {}", format_size(metadata.len()));
            println!(
                "Taken:        {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Format:       v{}", validation.schema_version);
            println!("Accounts:     {}", validation.accounts);
            println!("Transactions: {}", validation.transactions);
            println!("{}", validation.summary());
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let monthly = backups.iter().filter(|b| b.is_monthly).count();
            let daily = backups.len() - monthly;

            let excess = daily.saturating_sub(retention.daily_count as usize)
                + monthly.saturating_sub(retention.monthly_count as usize);

            println!(
                "{} daily and {} monthly backup(s); keeping {} daily and {} monthly",
                daily, monthly, retention.daily_count, retention.monthly_count
            );

            if excess == 0 {
                println!("Nothing to prune.");
            } else if !force {
                println!("{} backup(s) would be deleted.", excess);
                println!("Run 'money-tracker backup prune --force' to delete them.");
            } else {
                let deleted = manager.enforce_retention()?;
                for path in &deleted {
                    println!("  deleted {}", file_name(path));
                }
                println!("Deleted {} backup(s).", deleted.len());
            }
        }
    }

    Ok(())
}

/// Resolve a backup identifier ("latest", a filename or a path) to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> TrackerResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| TrackerError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }
    manager.resolve(backup)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        format!("{}d", days)
    } else {
        format!("{}mo", days / 30)
    }
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
