//! Account registry
//!
//! Accounts are unique by name (case-insensitive, after trimming). Balances
//! are only ever moved by the ledger, through an `AccountSlot` resolved
//! during validation. New balances are computed with checked arithmetic in
//! `plan_balances` and only written by `apply_balances`, so the commit phase
//! of a transaction mutation cannot fail on a missing account or overflow.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{names_match, Account, Money};

/// Position of a live account, valid until the registry is next resized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AccountSlot(usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from stored accounts, rejecting invalid or duplicate entries
    ///
    /// Stored balances are kept as-is; the ledger checks them against the
    /// transaction list afterwards.
    pub fn from_accounts(accounts: Vec<Account>) -> TrackerResult<Self> {
        let mut registry = Self::new();
        for mut account in accounts {
            account.name = account.name.trim().to_string();
            account.validate()?;
            if registry.contains(&account.name) {
                return Err(TrackerError::DuplicateAccount(account.name));
            }
            registry.accounts.push(account);
        }
        Ok(registry)
    }

    /// Accounts in creation order
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| names_match(&a.name, name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Current balance of an account
    pub fn balance(&self, name: &str) -> TrackerResult<Money> {
        self.get(name)
            .map(|a| a.balance)
            .ok_or_else(|| TrackerError::account_not_found(name.trim()))
    }

    /// Sum of all account balances, saturating at the `Money` bounds
    pub fn total_balance(&self) -> Money {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    /// Open a new account whose balance starts at `initial_balance`
    pub fn create(&mut self, name: &str, initial_balance: Money) -> TrackerResult<Account> {
        let account = Account::new(name.trim(), initial_balance);
        account.validate()?;
        if self.contains(&account.name) {
            return Err(TrackerError::DuplicateAccount(account.name));
        }
        self.accounts.push(account.clone());
        Ok(account)
    }

    /// Rename an account; a case-only rename of the same account is allowed
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> TrackerResult<Account> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(TrackerError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        let index = self
            .position(old_name)
            .ok_or_else(|| TrackerError::account_not_found(old_name.trim()))?;

        let clash = self
            .accounts
            .iter()
            .enumerate()
            .any(|(i, a)| i != index && names_match(&a.name, new_name));
        if clash {
            return Err(TrackerError::DuplicateAccount(new_name.to_string()));
        }

        let account = &mut self.accounts[index];
        account.name = new_name.to_string();
        Ok(account.clone())
    }

    /// Remove an account from the registry
    ///
    /// Dependent transactions are the ledger's concern; see `Ledger::remove_account`.
    pub fn remove(&mut self, name: &str) -> TrackerResult<Account> {
        let index = self
            .position(name)
            .ok_or_else(|| TrackerError::account_not_found(name.trim()))?;
        Ok(self.accounts.remove(index))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.accounts.iter().position(|a| names_match(&a.name, name))
    }

    /// Resolve a live account for a later balance adjustment
    pub(crate) fn slot(&self, name: &str) -> Option<AccountSlot> {
        self.position(name).map(AccountSlot)
    }

    /// Registered spelling of the account behind a slot
    pub(crate) fn name_at(&self, slot: AccountSlot) -> &str {
        &self.accounts[slot.0].name
    }

    /// Balances that result from applying every `(slot, delta)` move in order
    ///
    /// Fails with `InvalidAmount` if any balance would overflow. Nothing is
    /// written; pass the result to `apply_balances`.
    pub(crate) fn plan_balances<I>(&self, moves: I) -> TrackerResult<Vec<(AccountSlot, Money)>>
    where
        I: IntoIterator<Item = (AccountSlot, Money)>,
    {
        let mut planned: Vec<(AccountSlot, Money)> = Vec::new();
        for (slot, delta) in moves {
            let index = match planned.iter().position(|(s, _)| *s == slot) {
                Some(index) => index,
                None => {
                    planned.push((slot, self.accounts[slot.0].balance));
                    planned.len() - 1
                }
            };
            planned[index].1 = planned[index].1.checked_add(delta).ok_or_else(|| {
                TrackerError::InvalidAmount(format!(
                    "balance of account '{}' would overflow",
                    self.accounts[slot.0].name
                ))
            })?;
        }
        Ok(planned)
    }

    /// Write balances produced by `plan_balances`
    pub(crate) fn apply_balances(&mut self, planned: Vec<(AccountSlot, Money)>) {
        for (slot, balance) in planned {
            self.accounts[slot.0].balance = balance;
        }
    }
}
