//! Transaction ledger operations
//!
//! Adding, editing and deleting transactions while keeping every account
//! balance equal to its initial balance plus the signed sum of the
//! transactions posted to it.

use std::collections::HashSet;

use super::accounts::AccountSlot;
use super::Ledger;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Transaction, TransactionDraft, TransactionId, TransactionPatch};

/// A draft that passed validation, with its references resolved
struct Resolved {
    category: String,
    slot: AccountSlot,
}

impl Ledger {
    /// All transactions ordered by date, then id
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Look up a transaction by id
    pub fn get_transaction(&self, id: TransactionId) -> TrackerResult<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))
    }

    /// Record a new transaction and post it to its account
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> TrackerResult<Transaction> {
        let resolved = self.resolve_draft(&draft)?;
        let balances = self
            .accounts
            .plan_balances([(resolved.slot, draft.kind.signed(draft.amount))])?;

        let txn = Transaction {
            id: self.next_id,
            date: draft.date,
            kind: draft.kind,
            category: resolved.category,
            account: self.accounts.name_at(resolved.slot).to_string(),
            amount: draft.amount,
            note: clean_note(draft.note),
        };

        self.next_id = self.next_id.next();
        self.accounts.apply_balances(balances);
        self.insert_sorted(txn.clone());
        Ok(txn)
    }

    /// Apply a partial update to a transaction
    ///
    /// The old effect is reversed on the old account and the new effect
    /// applied to the new one. If the old account no longer exists (orphan
    /// policy) there is nothing to reverse, but the result must name a live
    /// account and category. Returns the transaction before and after.
    pub fn edit_transaction(
        &mut self,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> TrackerResult<(Transaction, Transaction)> {
        let index = self.index_of(id)?;
        let before = self.transactions[index].clone();

        let draft = patch.apply_to(&before);
        let resolved = self.resolve_draft(&draft)?;
        let reversal = self
            .accounts
            .slot(&before.account)
            .map(|slot| (slot, -before.signed_amount()));
        let balances = self.accounts.plan_balances(
            reversal
                .into_iter()
                .chain([(resolved.slot, draft.kind.signed(draft.amount))]),
        )?;

        let after = Transaction {
            id,
            date: draft.date,
            kind: draft.kind,
            category: resolved.category,
            account: self.accounts.name_at(resolved.slot).to_string(),
            amount: draft.amount,
            note: clean_note(draft.note),
        };

        self.accounts.apply_balances(balances);

        self.transactions.remove(index);
        self.insert_sorted(after.clone());
        Ok((before, after))
    }

    /// Delete a transaction and reverse its effect on its account
    pub fn delete_transaction(&mut self, id: TransactionId) -> TrackerResult<Transaction> {
        let index = self.index_of(id)?;
        let txn = &self.transactions[index];
        let reversal = self
            .accounts
            .slot(&txn.account)
            .map(|slot| (slot, -txn.signed_amount()));
        let balances = self.accounts.plan_balances(reversal)?;

        self.accounts.apply_balances(balances);
        Ok(self.transactions.remove(index))
    }

    /// Check the stored balances and ids against the transaction list
    pub fn verify_balances(&self) -> TrackerResult<()> {
        for account in self.accounts.list() {
            let expected = self
                .transactions
                .iter()
                .filter(|t| t.references_account(&account.name))
                .try_fold(account.initial_balance, |total, t| {
                    total.checked_add(t.signed_amount())
                })
                .ok_or_else(|| {
                    TrackerError::CorruptState(format!(
                        "transactions of account '{}' overflow its balance",
                        account.name
                    ))
                })?;
            if account.balance != expected {
                return Err(TrackerError::CorruptState(format!(
                    "account '{}' has balance {} but its transactions imply {}",
                    account.name, account.balance, expected
                )));
            }
        }
        Ok(())
    }

    /// Full consistency check run whenever a ledger is rebuilt from storage
    pub(crate) fn verify(&self) -> TrackerResult<()> {
        let mut seen = HashSet::new();
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(TrackerError::CorruptState(format!(
                    "duplicate transaction id {}",
                    txn.id
                )));
            }
            if txn.id >= self.next_id {
                return Err(TrackerError::CorruptState(format!(
                    "transaction id {} is not below the next id {}",
                    txn.id, self.next_id
                )));
            }
            if !txn.amount.is_positive() || !txn.amount.is_within_limit() {
                return Err(TrackerError::CorruptState(format!(
                    "transaction {} has out-of-range amount {}",
                    txn.id, txn.amount
                )));
            }
        }
        self.verify_balances()
    }

    fn index_of(&self, id: TransactionId) -> TrackerResult<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))
    }

    /// Validation phase shared by add and edit
    fn resolve_draft(&self, draft: &TransactionDraft) -> TrackerResult<Resolved> {
        if !draft.amount.is_positive() {
            return Err(TrackerError::InvalidAmount(format!(
                "amount must be greater than zero, got {}",
                draft.amount
            )));
        }
        if !draft.amount.is_within_limit() {
            return Err(TrackerError::InvalidAmount(format!(
                "amount {} exceeds the limit of {}",
                draft.amount,
                Money::MAX_AMOUNT
            )));
        }

        let category = self
            .categories
            .find(&draft.category, draft.kind)
            .ok_or_else(|| TrackerError::UnknownCategory {
                name: draft.category.trim().to_string(),
                kind: draft.kind,
            })?
            .to_string();

        let slot = self
            .accounts
            .slot(&draft.account)
            .ok_or_else(|| TrackerError::UnknownAccount(draft.account.trim().to_string()))?;

        Ok(Resolved { category, slot })
    }

    fn insert_sorted(&mut self, txn: Transaction) {
        let key = (txn.date, txn.id);
        let index = self
            .transactions
            .partition_point(|t| (t.date, t.id) < key);
        self.transactions.insert(index, txn);
    }
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
