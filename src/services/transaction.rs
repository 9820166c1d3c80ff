//! Transaction service
//!
//! Records, edits and deletes transactions, and lists them through a
//! composable filter.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    names_match, Transaction, TransactionDraft, TransactionId, TransactionKind, TransactionPatch,
};
use crate::storage::Storage;

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Keep only the most recent N matches
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, name: impl Into<String>) -> Self {
        self.account = Some(name.into());
        self
    }

    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.account
            .as_deref()
            .map_or(true, |name| txn.references_account(name))
            && self
                .category
                .as_deref()
                .map_or(true, |name| names_match(&txn.category, name))
            && self.kind.map_or(true, |kind| txn.kind == kind)
            && self.start_date.map_or(true, |start| txn.date >= start)
            && self.end_date.map_or(true, |end| txn.date <= end)
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a mut Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    pub fn create(&mut self, draft: TransactionDraft) -> TrackerResult<Transaction> {
        let txn = self.storage.ledger_mut().add_transaction(draft)?;

        self.storage.save()?;
        self.storage
            .log_create(EntityType::Transaction, txn.id.to_string(), None, &txn)?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> TrackerResult<Transaction> {
        self.storage.ledger().get_transaction(id).cloned()
    }

    /// Transactions matching `filter`, ordered by date then id
    pub fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let mut matching: Vec<Transaction> = self
            .storage
            .ledger()
            .transactions()
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();

        if let Some(limit) = filter.limit {
            let skip = matching.len().saturating_sub(limit);
            matching.drain(..skip);
        }

        matching
    }

    /// Apply a partial update; an empty patch is rejected
    pub fn update(
        &mut self,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> TrackerResult<Transaction> {
        if patch.is_empty() {
            return Err(TrackerError::Validation(
                "Nothing to update: specify at least one field".into(),
            ));
        }

        let (before, after) = self.storage.ledger_mut().edit_transaction(id, patch)?;

        self.storage.save()?;
        self.storage.log_update(
            EntityType::Transaction,
            id.to_string(),
            None,
            &before,
            &after,
        )?;

        Ok(after)
    }

    pub fn delete(&mut self, id: TransactionId) -> TrackerResult<Transaction> {
        let txn = self.storage.ledger_mut().delete_transaction(id)?;

        self.storage.save()?;
        self.storage
            .log_delete(EntityType::Transaction, id.to_string(), None, &txn)?;

        Ok(txn)
    }

    pub fn count(&self) -> usize {
        self.storage.ledger().transactions().len()
    }
}
