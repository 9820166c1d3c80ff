//! Backup manager for money-tracker
//!
//! Creates dated snapshot archives and prunes them according to the
//! retention policy.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::TrackerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::{write_json_atomic, Snapshot};

/// Current archive format version
pub const ARCHIVE_VERSION: u32 = 1;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// When the backup was created, from its filename
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Whether this is the first backup of its month (kept longer)
    pub is_monthly: bool,
}

/// Backup archive format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub data: Snapshot,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: TrackerPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    /// Write a backup of `snapshot`; returns the path of the new archive
    pub fn create_backup(&self, snapshot: &Snapshot) -> TrackerResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            TrackerError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: ARCHIVE_VERSION,
            created_at: now,
            data: snapshot.clone(),
        };
        write_json_atomic(&backup_path, &archive)?;

        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> TrackerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            TrackerError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                TrackerError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        // Oldest first, so the first one seen in each month is the monthly backup
        backups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut months_seen = HashSet::new();
        for backup in &mut backups {
            backup.is_monthly =
                months_seen.insert((backup.created_at.year(), backup.created_at.month()));
        }

        backups.reverse();
        Ok(backups)
    }

    /// Delete backups beyond the retention limits; returns the deleted paths
    pub fn enforce_retention(&self) -> TrackerResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) = self
            .list_backups()?
            .into_iter()
            .partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(
                monthly
                    .into_iter()
                    .skip(self.retention.monthly_count as usize),
            );

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path).map_err(|e| {
                TrackerError::Io(format!(
                    "Failed to delete old backup {}: {}",
                    backup.filename, e
                ))
            })?;
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(
        &self,
        snapshot: &Snapshot,
    ) -> TrackerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(snapshot)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Resolve a backup given either a bare filename or a path
    pub fn resolve(&self, name_or_path: &str) -> TrackerResult<PathBuf> {
        let direct = PathBuf::from(name_or_path);
        if direct.is_file() {
            return Ok(direct);
        }
        let in_dir = self.backup_dir.join(name_or_path);
        if in_dir.is_file() {
            return Ok(in_dir);
        }
        Err(TrackerError::NotFound {
            entity_type: "Backup",
            identifier: name_or_path.to_string(),
        })
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> TrackerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Parse `YYYYMMDD-HHMMSS` or `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis.checked_mul(1_000_000)?)?;

    Some(NaiveDateTime::new(date, time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use tempfile::TempDir;

    fn create_test_manager(daily: u32, monthly: u32) -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let retention = BackupRetention {
            daily_count: daily,
            monthly_count: monthly,
        };
        (BackupManager::new(paths, retention), temp_dir)
    }

    fn snapshot() -> Snapshot {
        Snapshot::from_ledger(&Ledger::with_default_categories())
    }

    fn write_named(manager: &BackupManager, stamp: &str) -> PathBuf {
        let path = manager.backup_dir().join(format!("backup-{}.json", stamp));
        let archive = BackupArchive {
            schema_version: ARCHIVE_VERSION,
            created_at: parse_backup_timestamp(stamp).unwrap(),
            data: snapshot(),
        };
        write_json_atomic(&path, &archive).unwrap();
        path
    }

    #[test]
    fn test_create_backup() {
        let (manager, _temp) = create_test_manager(3, 2);

        let backup_path = manager.create_backup(&snapshot()).unwrap();
        assert!(backup_path.exists());

        let contents = fs::read_to_string(&backup_path).unwrap();
        let archive: BackupArchive = serde_json::from_str(&contents).unwrap();
        assert_eq!(archive.schema_version, ARCHIVE_VERSION);
        assert_eq!(archive.data, snapshot());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _temp) = create_test_manager(3, 2);
        write_named(&manager, "20240105-090000-000");
        write_named(&manager, "20240220-090000-000");
        write_named(&manager, "20240110-090000-000");
        fs::write(manager.backup_dir().join("notes.json"), "{}").unwrap();

        let backups = manager.list_backups().unwrap();
        let names: Vec<_> = backups.iter().map(|b| b.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "backup-20240220-090000-000.json",
                "backup-20240110-090000-000.json",
                "backup-20240105-090000-000.json",
            ]
        );
        // First backup of January and of February are monthly
        assert!(backups[0].is_monthly);
        assert!(!backups[1].is_monthly);
        assert!(backups[2].is_monthly);
    }

    #[test]
    fn test_retention_policy() {
        let (manager, _temp) = create_test_manager(2, 1);
        let jan_first = write_named(&manager, "20240101-080000-000");
        let jan_daily_old = write_named(&manager, "20240102-080000-000");
        write_named(&manager, "20240103-080000-000");
        write_named(&manager, "20240104-080000-000");
        let feb_first = write_named(&manager, "20240201-080000-000");

        let deleted = manager.enforce_retention().unwrap();

        // Daily: keep 01-04 and 01-03. Monthly: keep February only.
        assert_eq!(deleted.len(), 2);
        assert!(deleted.contains(&jan_daily_old));
        assert!(deleted.contains(&jan_first));
        assert!(feb_first.exists());
        assert_eq!(manager.list_backups().unwrap().len(), 3);
    }

    #[test]
    fn test_create_backup_with_retention() {
        let (manager, _temp) = create_test_manager(1, 1);
        write_named(&manager, "20200101-000000-000");
        write_named(&manager, "20200102-000000-000");
        write_named(&manager, "20200103-000000-000");

        let (new_backup, deleted) = manager.create_backup_with_retention(&snapshot()).unwrap();
        assert!(new_backup.exists());
        assert!(!deleted.is_empty());
    }

    #[test]
    fn test_get_latest_backup() {
        let (manager, _temp) = create_test_manager(3, 2);
        assert!(manager.get_latest_backup().unwrap().is_none());

        let path = manager.create_backup(&snapshot()).unwrap();
        assert_eq!(manager.get_latest_backup().unwrap().unwrap().path, path);
    }

    #[test]
    fn test_resolve() {
        let (manager, _temp) = create_test_manager(3, 2);
        let path = write_named(&manager, "20240105-090000-000");

        assert_eq!(
            manager.resolve("backup-20240105-090000-000.json").unwrap(),
            path
        );
        assert_eq!(manager.resolve(path.to_str().unwrap()).unwrap(), path);
        assert!(manager.resolve("missing.json").unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let timestamp = parse_backup_timestamp("20251127-143022").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);

        let timestamp = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(timestamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("20251327-143022").is_none());
        assert!(parse_backup_timestamp("2025-11-27").is_none());
        assert!(parse_backup_timestamp("20251127-143022-1-2").is_none());
    }
}
