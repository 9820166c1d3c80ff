//! Category service
//!
//! Adds, renames and deletes income and expense categories.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::ledger::Removal;
use crate::models::{Category, TransactionKind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a mut Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Category names of a kind, in registration order
    pub fn list(&self, kind: TransactionKind) -> Vec<String> {
        self.storage.ledger().categories().list(kind).to_vec()
    }

    /// Every category, income first
    pub fn list_all(&self) -> Vec<Category> {
        self.storage.ledger().categories().all().collect()
    }

    pub fn add(&mut self, name: &str, kind: TransactionKind) -> TrackerResult<Category> {
        let stored = self.storage.ledger_mut().add_category(name, kind)?;
        let category = Category::new(stored, kind);

        self.storage.save()?;
        self.storage.log_create(
            EntityType::Category,
            category.name.clone(),
            Some(category.to_string()),
            &category,
        )?;

        Ok(category)
    }

    /// Rename a category; transactions of the same kind follow the new name
    pub fn rename(
        &mut self,
        name: &str,
        kind: TransactionKind,
        new_name: &str,
    ) -> TrackerResult<Category> {
        let before = self.find(name, kind)?;
        let stored = self
            .storage
            .ledger_mut()
            .rename_category(name, kind, new_name)?;
        let after = Category::new(stored, kind);

        self.storage.save()?;
        self.storage.log_update(
            EntityType::Category,
            before.name.clone(),
            Some(after.to_string()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Delete a category; its transactions are handled by the category deletion policy
    pub fn delete(&mut self, name: &str, kind: TransactionKind) -> TrackerResult<(Category, Removal)> {
        let category = self.find(name, kind)?;
        let removal = self.storage.ledger_mut().remove_category(name, kind)?;

        self.storage.save()?;

        let mut entries = vec![AuditEntry::delete(
            EntityType::Category,
            category.name.clone(),
            Some(category.to_string()),
            &category,
        )];
        entries.extend(removal.cascaded.iter().map(|txn| {
            AuditEntry::delete(EntityType::Transaction, txn.id.to_string(), None, txn)
        }));
        self.storage.log_batch(&entries)?;

        Ok((category, removal))
    }

    fn find(&self, name: &str, kind: TransactionKind) -> TrackerResult<Category> {
        self.storage
            .ledger()
            .categories()
            .find(name, kind)
            .map(|stored| Category::new(stored, kind))
            .ok_or_else(|| TrackerError::category_not_found(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{paths::TrackerPaths, settings::Settings};
    use crate::ledger::DeletionPolicy;
    use crate::models::{Money, TransactionDraft};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage(settings: &Settings) -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths, settings).unwrap();
        storage
            .ledger_mut()
            .create_account("Cash", Money::from_cents(10000))
            .unwrap();
        storage
            .ledger_mut()
            .add_transaction(TransactionDraft::new(
                Money::from_cents(2000),
                TransactionKind::Expense,
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                "Food",
                "Cash",
            ))
            .unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_list() {
        let (_temp_dir, mut storage) = create_test_storage(&Settings::default());
        let mut service = CategoryService::new(&mut storage);

        let category = service.add("  Rent ", TransactionKind::Expense).unwrap();
        assert_eq!(category.name, "Rent");
        assert_eq!(service.list(TransactionKind::Expense).len(), 8);
        assert_eq!(service.list_all().len(), 13);

        assert!(matches!(
            service.add("rent", TransactionKind::Expense),
            Err(TrackerError::DuplicateCategory { .. })
        ));
    }

    #[test]
    fn test_rename_relabels() {
        let (_temp_dir, mut storage) = create_test_storage(&Settings::default());
        let renamed = CategoryService::new(&mut storage)
            .rename("food", TransactionKind::Expense, "Groceries")
            .unwrap();
        assert_eq!(renamed.name, "Groceries");
        assert_eq!(storage.ledger().transactions()[0].category, "Groceries");

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("name: \"Food\" -> \"Groceries\"")
        );
    }

    #[test]
    fn test_delete_in_use_rejected_by_default() {
        let (_temp_dir, mut storage) = create_test_storage(&Settings::default());
        let mut service = CategoryService::new(&mut storage);

        let err = service.delete("Food", TransactionKind::Expense).unwrap_err();
        assert_eq!(err.to_string(), "Category 'Food' is used by 1 transaction(s)");

        let (deleted, removal) = service.delete("Bills", TransactionKind::Expense).unwrap();
        assert_eq!(deleted.name, "Bills");
        assert_eq!(removal, Removal::default());
    }

    #[test]
    fn test_delete_cascade() {
        let settings = Settings {
            category_deletion: DeletionPolicy::Cascade,
            ..Settings::default()
        };
        let (_temp_dir, mut storage) = create_test_storage(&settings);
        let (_, removal) = CategoryService::new(&mut storage)
            .delete("Food", TransactionKind::Expense)
            .unwrap();

        assert_eq!(removal.cascaded.len(), 1);
        assert_eq!(
            storage.ledger().balance("Cash").unwrap(),
            Money::from_cents(10000)
        );
        assert_eq!(storage.audit().read_all().unwrap().len(), 2);
    }
}
