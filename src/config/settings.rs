//! User settings for money-tracker
//!
//! Manages user preferences: what deleting an account or category does to
//! its transactions, backup retention and the currency symbol.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::ledger::{DeletionPolicy, LedgerPolicy};

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings for money-tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// What deleting an account does to its transactions
    #[serde(default = "default_account_deletion")]
    pub account_deletion: DeletionPolicy,

    /// What deleting a category does to its transactions
    #[serde(default = "default_category_deletion")]
    pub category_deletion: DeletionPolicy,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_account_deletion() -> DeletionPolicy {
    DeletionPolicy::Cascade
}

fn default_category_deletion() -> DeletionPolicy {
    DeletionPolicy::Reject
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            account_deletion: default_account_deletion(),
            category_deletion: default_category_deletion(),
            backup_retention: BackupRetention::default(),
            currency_symbol: default_currency(),
        }
    }
}

/// Keys accepted by [`Settings::set`]
pub const SETTING_KEYS: &[&str] = &[
    "account_deletion",
    "category_deletion",
    "backup_daily_count",
    "backup_monthly_count",
    "currency_symbol",
];

impl Settings {
    /// The deletion policies the ledger should enforce
    pub fn ledger_policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            account_deletion: self.account_deletion,
            category_deletion: self.category_deletion,
        }
    }

    /// Update one setting from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        let value = value.trim();
        match key.trim().replace('-', "_").as_str() {
            "account_deletion" => self.account_deletion = parse_policy(value)?,
            "category_deletion" => self.category_deletion = parse_policy(value)?,
            "backup_daily_count" => self.backup_retention.daily_count = parse_count(value)?,
            "backup_monthly_count" => self.backup_retention.monthly_count = parse_count(value)?,
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(TrackerError::Config(
                        "currency_symbol cannot be empty".into(),
                    ));
                }
                self.currency_symbol = value.to_string();
            }
            other => {
                return Err(TrackerError::Config(format!(
                    "Unknown setting '{}' (expected one of: {})",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Settings as `(key, value)` pairs, in `SETTING_KEYS` order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("account_deletion", self.account_deletion.to_string()),
            ("category_deletion", self.category_deletion.to_string()),
            (
                "backup_daily_count",
                self.backup_retention.daily_count.to_string(),
            ),
            (
                "backup_monthly_count",
                self.backup_retention.monthly_count.to_string(),
            ),
            ("currency_symbol", self.currency_symbol.clone()),
        ]
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            TrackerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

fn parse_policy(value: &str) -> Result<DeletionPolicy, TrackerError> {
    match value.to_lowercase().as_str() {
        "reject" => Ok(DeletionPolicy::Reject),
        "cascade" => Ok(DeletionPolicy::Cascade),
        "orphan" => Ok(DeletionPolicy::Orphan),
        _ => Err(TrackerError::Config(format!(
            "Invalid deletion policy '{}' (expected reject, cascade or orphan)",
            value
        ))),
    }
}

fn parse_count(value: &str) -> Result<u32, TrackerError> {
    value
        .parse()
        .map_err(|_| TrackerError::Config(format!("Expected a whole number, got '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.account_deletion, DeletionPolicy::Cascade);
        assert_eq!(settings.category_deletion, DeletionPolicy::Reject);
        assert_eq!(settings.backup_retention.daily_count, 30);
        assert_eq!(settings.backup_retention.monthly_count, 12);
        assert_eq!(settings.ledger_policy(), LedgerPolicy::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.category_deletion = DeletionPolicy::Orphan;
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"account_deletion":"reject"}"#).unwrap();
        assert_eq!(settings.account_deletion, DeletionPolicy::Reject);
        assert_eq!(settings.category_deletion, DeletionPolicy::Reject);
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_set() {
        let mut settings = Settings::default();
        settings.set("account-deletion", "Orphan").unwrap();
        settings.set("backup_daily_count", "7").unwrap();
        assert_eq!(settings.account_deletion, DeletionPolicy::Orphan);
        assert_eq!(settings.backup_retention.daily_count, 7);

        assert!(matches!(
            settings.set("account_deletion", "archive"),
            Err(TrackerError::Config(_))
        ));
        assert!(matches!(
            settings.set("theme", "dark"),
            Err(TrackerError::Config(_))
        ));
        assert!(matches!(
            settings.set("backup_monthly_count", "-1"),
            Err(TrackerError::Config(_))
        ));
    }

    #[test]
    fn test_entries_cover_all_keys() {
        let keys: Vec<_> = Settings::default().entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, SETTING_KEYS);
    }
}
