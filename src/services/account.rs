//! Account service
//!
//! Opens, renames and deletes accounts, saving the snapshot and writing an
//! audit entry after each successful change.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::ledger::Removal;
use crate::models::{Account, Money};
use crate::storage::Storage;

/// An account together with how many transactions post to it
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    pub transaction_count: usize,
}

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a mut Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Open a new account
    pub fn create(&mut self, name: &str, initial_balance: Money) -> TrackerResult<Account> {
        let account = self
            .storage
            .ledger_mut()
            .create_account(name, initial_balance)?;

        self.storage.save()?;
        self.storage.log_create(
            EntityType::Account,
            account.name.clone(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }

    /// Look up an account by name (case-insensitive)
    pub fn get(&self, name: &str) -> TrackerResult<Account> {
        self.storage
            .ledger()
            .accounts()
            .get(name)
            .cloned()
            .ok_or_else(|| TrackerError::account_not_found(name.trim()))
    }

    /// All accounts in creation order
    pub fn list(&self) -> Vec<Account> {
        self.storage.ledger().accounts().list().to_vec()
    }

    /// Every account with its transaction count
    pub fn list_with_counts(&self) -> Vec<AccountSummary> {
        self.list()
            .into_iter()
            .map(|account| self.summarize(account))
            .collect()
    }

    pub fn summary(&self, name: &str) -> TrackerResult<AccountSummary> {
        self.get(name).map(|account| self.summarize(account))
    }

    fn summarize(&self, account: Account) -> AccountSummary {
        let transaction_count = self
            .storage
            .ledger()
            .filter_by_account(&account.name)
            .count();
        AccountSummary {
            account,
            transaction_count,
        }
    }

    pub fn balance(&self, name: &str) -> TrackerResult<Money> {
        self.storage.ledger().balance(name)
    }

    /// Sum of every account balance
    pub fn total_balance(&self) -> Money {
        self.storage.ledger().accounts().total_balance()
    }

    /// Rename an account; its transactions follow the new name
    pub fn rename(&mut self, name: &str, new_name: &str) -> TrackerResult<Account> {
        let before = self.get(name)?;
        let after = self.storage.ledger_mut().rename_account(name, new_name)?;

        self.storage.save()?;
        self.storage.log_update(
            EntityType::Account,
            before.name.clone(),
            Some(after.name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Delete an account; its transactions are handled by the account deletion policy
    pub fn delete(&mut self, name: &str) -> TrackerResult<(Account, Removal)> {
        let account = self.get(name)?;
        let removal = self.storage.ledger_mut().remove_account(name)?;

        self.storage.save()?;

        let mut entries = vec![AuditEntry::delete(
            EntityType::Account,
            account.name.clone(),
            Some(account.name.clone()),
            &account,
        )];
        entries.extend(removal.cascaded.iter().map(|txn| {
            AuditEntry::delete(EntityType::Transaction, txn.id.to_string(), None, txn)
        }));
        self.storage.log_batch(&entries)?;

        Ok((account, removal))
    }
}
