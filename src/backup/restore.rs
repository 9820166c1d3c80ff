//! Backup restoration for money-tracker
//!
//! A backup is only restored after its snapshot has been rebuilt into a
//! ledger and every invariant checked.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::ledger::Ledger;
use crate::storage::write_json_atomic;

use super::manager::{BackupArchive, ARCHIVE_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: TrackerPaths,
}

impl RestoreManager {
    pub fn new(paths: TrackerPaths) -> Self {
        Self { paths }
    }

    /// Replace `data.json` with the snapshot stored in a backup
    ///
    /// Fails without touching the current data if the backup is unreadable
    /// or its snapshot is inconsistent.
    pub fn restore_from_file(&self, backup_path: &Path) -> TrackerResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        let ledger = check_archive(&archive)?;

        self.paths.ensure_directories()?;
        write_json_atomic(self.paths.data_file(), &archive.data)?;

        Ok(RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            accounts: ledger.accounts().len(),
            categories: ledger.categories().all().count(),
            transactions: ledger.transactions().len(),
        })
    }

    /// Validate a backup file without restoring it
    ///
    /// I/O and parse failures are errors; an archive that parses but holds
    /// an inconsistent ledger yields `is_valid == false` with the reason.
    pub fn validate_backup(&self, backup_path: &Path) -> TrackerResult<ValidationResult> {
        let archive = read_archive(backup_path)?;

        let mut result = ValidationResult {
            is_valid: false,
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            accounts: archive.data.accounts.len(),
            transactions: archive.data.transactions.len(),
            error: None,
        };

        match check_archive(&archive) {
            Ok(_) => result.is_valid = true,
            Err(e) => result.error = Some(e.to_string()),
        }

        Ok(result)
    }
}

fn read_archive(backup_path: &Path) -> TrackerResult<BackupArchive> {
    let contents = fs::read_to_string(backup_path)
        .map_err(|e| TrackerError::Io(format!("Failed to read backup file: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| TrackerError::Json(format!("Failed to parse backup file: {}", e)))
}

fn check_archive(archive: &BackupArchive) -> TrackerResult<Ledger> {
    if archive.schema_version > ARCHIVE_VERSION {
        return Err(TrackerError::Persistence(format!(
            "Backup format version {} is newer than supported version {}",
            archive.schema_version, ARCHIVE_VERSION
        )));
    }
    archive.data.clone().into_ledger()
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub accounts: usize,
    pub categories: usize,
    pub transactions: usize,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        format!(
            "Restored backup from {}: {} account(s), {} categor{}, {} transaction(s)",
            self.backup_date.format("%Y-%m-%d %H:%M:%S UTC"),
            self.accounts,
            self.categories,
            if self.categories == 1 { "y" } else { "ies" },
            self.transactions
        )
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub accounts: usize,
    pub transactions: usize,
    /// Why the backup is invalid, when it is
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        match &self.error {
            None => format!(
                "Valid backup (v{}): {} account(s), {} transaction(s)",
                self.schema_version, self.accounts, self.transactions
            ),
            Some(reason) => format!("Invalid backup (v{}): {}", self.schema_version, reason),
        }
    }
}
