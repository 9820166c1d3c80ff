//! Backup system for money-tracker
//!
//! Provides rolling snapshot backups with configurable retention and a
//! validated restore path.
//!
//! # Backup Format
//!
//! Each backup is a JSON archive in the backup directory named
//! `backup-YYYYMMDD-HHMMSS-mmm.json` with:
//! - `schema_version`: archive format version
//! - `created_at`: when the backup was taken (UTC)
//! - `data`: the ledger snapshot, in the same shape as `data.json`
//!
//! # Retention Policy
//!
//! The first backup of each calendar month is a monthly backup; the rest
//! are daily backups. By default the newest 30 daily and 12 monthly
//! backups are kept.
//!
//! # Example
//!
//! ```rust,ignore
//! use money_tracker::backup::{BackupManager, RestoreManager};
//! use money_tracker::storage::Snapshot;
//!
//! let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());
//! let (path, _pruned) = manager.create_backup_with_retention(&Snapshot::from_ledger(ledger))?;
//!
//! let result = RestoreManager::new(paths).restore_from_file(&path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
