//! In-memory ledger
//!
//! `Ledger` is the single application-state value: it owns the category
//! registry, the account registry and the transaction list, and enforces
//! the consistency rules between them. Transactions point at accounts and
//! categories by name only; every cross-reference is resolved through the
//! registries at the moment it is needed.
//!
//! Every compound mutation follows the same two phases: validate all
//! preconditions against `&self`, then apply the effects. The apply phase
//! contains no fallible step, so a failed operation leaves the ledger
//! exactly as it was.

pub mod accounts;
pub mod categories;
pub mod query;
pub mod summary;
pub mod transactions;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Account, Money, Transaction, TransactionId, TransactionKind};

pub use accounts::AccountRegistry;
pub use categories::CategoryRegistry;
pub use summary::{CategoryBreakdown, Summary};

/// What happens to transactions that still reference a deleted account or category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionPolicy {
    /// Refuse the deletion with `InUse`
    Reject,
    /// Delete the dependent transactions as well
    Cascade,
    /// Keep the transactions; the stale name stays as a historical label
    Orphan,
}

impl fmt::Display for DeletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Cascade => write!(f, "cascade"),
            Self::Orphan => write!(f, "orphan"),
        }
    }
}

/// Deletion policies applied by a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPolicy {
    pub account_deletion: DeletionPolicy,
    pub category_deletion: DeletionPolicy,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            account_deletion: DeletionPolicy::Cascade,
            category_deletion: DeletionPolicy::Reject,
        }
    }
}

/// Outcome of deleting an account or category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    /// Transactions deleted along with the entity (cascade policy)
    pub cascaded: Vec<Transaction>,
    /// Number of transactions left carrying the stale name (orphan policy)
    pub orphaned: usize,
}

/// The application state: registries plus the transaction list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    categories: CategoryRegistry,
    accounts: AccountRegistry,
    /// Kept sorted by `(date, id)`
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    policy: LedgerPolicy,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// An empty ledger with no categories, accounts or transactions
    pub fn new() -> Self {
        Self {
            categories: CategoryRegistry::new(),
            accounts: AccountRegistry::new(),
            transactions: Vec::new(),
            next_id: TransactionId::FIRST,
            policy: LedgerPolicy::default(),
        }
    }

    /// A fresh ledger seeded with the default income and expense categories
    pub fn with_default_categories() -> Self {
        Self {
            categories: CategoryRegistry::with_defaults(),
            ..Self::new()
        }
    }

    /// Rebuild a ledger from persisted parts and check its invariants
    ///
    /// `next_id` is raised past the highest stored id if needed, so ids are
    /// never reused even when the stored counter is stale or missing.
    pub fn from_parts(
        categories: CategoryRegistry,
        accounts: AccountRegistry,
        mut transactions: Vec<Transaction>,
        next_id: Option<TransactionId>,
    ) -> TrackerResult<Self> {
        transactions.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));

        let after_max = transactions
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(TransactionId::FIRST, |id| id.next());
        let next_id = next_id.map_or(after_max, |stored| stored.max(after_max));

        let ledger = Self {
            categories,
            accounts,
            transactions,
            next_id,
            policy: LedgerPolicy::default(),
        };
        ledger.verify()?;
        Ok(ledger)
    }

    /// Replace the deletion policies
    pub fn with_policy(mut self, policy: LedgerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    /// The id the next added transaction will receive
    pub fn next_transaction_id(&self) -> TransactionId {
        self.next_id
    }

    // ----- Category operations -----

    /// Register a new category under a kind
    pub fn add_category(&mut self, name: &str, kind: TransactionKind) -> TrackerResult<String> {
        self.categories.add(name, kind)
    }

    /// Rename a category and relabel every transaction of that kind using it
    pub fn rename_category(
        &mut self,
        old_name: &str,
        kind: TransactionKind,
        new_name: &str,
    ) -> TrackerResult<String> {
        let old_canonical = self
            .categories
            .find(old_name, kind)
            .ok_or_else(|| TrackerError::category_not_found(old_name.trim()))?
            .to_string();

        if !crate::models::names_match(&old_canonical, new_name) {
            self.ensure_category_not_orphaned(new_name, kind)?;
        }

        let new_canonical = self.categories.rename(&old_canonical, kind, new_name)?;

        for txn in self
            .transactions
            .iter_mut()
            .filter(|t| t.references_category(&old_canonical, kind))
        {
            txn.category = new_canonical.clone();
        }

        Ok(new_canonical)
    }

    /// Delete a category, handling dependent transactions per the category policy
    pub fn remove_category(&mut self, name: &str, kind: TransactionKind) -> TrackerResult<Removal> {
        let canonical = self
            .categories
            .find(name, kind)
            .ok_or_else(|| TrackerError::category_not_found(name.trim()))?
            .to_string();

        let dependents = self
            .transactions
            .iter()
            .filter(|t| t.references_category(&canonical, kind))
            .count();

        let mut removal = Removal::default();
        if dependents > 0 {
            match self.policy.category_deletion {
                DeletionPolicy::Reject => {
                    return Err(TrackerError::InUse {
                        entity_type: "Category",
                        identifier: canonical,
                        count: dependents,
                    });
                }
                DeletionPolicy::Cascade => {
                    removal.cascaded = self
                        .remove_transactions_where(|t| t.references_category(&canonical, kind))?;
                }
                DeletionPolicy::Orphan => removal.orphaned = dependents,
            }
        }

        self.categories.remove(&canonical, kind)?;
        Ok(removal)
    }

    // ----- Account operations -----

    /// Open a new account with a non-negative initial balance
    pub fn create_account(&mut self, name: &str, initial_balance: Money) -> TrackerResult<Account> {
        self.ensure_name_not_orphaned(name)?;
        self.accounts.create(name, initial_balance)
    }

    /// Rename an account and repoint every transaction that references it
    pub fn rename_account(&mut self, old_name: &str, new_name: &str) -> TrackerResult<Account> {
        let old_canonical = self
            .accounts
            .get(old_name)
            .ok_or_else(|| TrackerError::account_not_found(old_name.trim()))?
            .name
            .clone();

        if !crate::models::names_match(&old_canonical, new_name) {
            self.ensure_name_not_orphaned(new_name)?;
        }

        let renamed = self.accounts.rename(&old_canonical, new_name)?;

        for txn in self
            .transactions
            .iter_mut()
            .filter(|t| t.references_account(&old_canonical))
        {
            txn.account = renamed.name.clone();
        }

        Ok(renamed)
    }

    /// Delete an account, handling dependent transactions per the account policy
    pub fn remove_account(&mut self, name: &str) -> TrackerResult<Removal> {
        let canonical = self
            .accounts
            .get(name)
            .ok_or_else(|| TrackerError::account_not_found(name.trim()))?
            .name
            .clone();

        let dependents = self
            .transactions
            .iter()
            .filter(|t| t.references_account(&canonical))
            .count();

        let mut removal = Removal::default();
        if dependents > 0 {
            match self.policy.account_deletion {
                DeletionPolicy::Reject => {
                    return Err(TrackerError::InUse {
                        entity_type: "Account",
                        identifier: canonical,
                        count: dependents,
                    });
                }
                DeletionPolicy::Cascade => {
                    removal.cascaded =
                        self.remove_transactions_where(|t| t.references_account(&canonical))?;
                }
                DeletionPolicy::Orphan => removal.orphaned = dependents,
            }
        }

        self.accounts.remove(&canonical)?;
        Ok(removal)
    }

    /// Current balance of an account
    pub fn balance(&self, name: &str) -> TrackerResult<Money> {
        self.accounts.balance(name)
    }

    // ----- Internal helpers -----

    /// A name carried by transactions whose account no longer exists cannot
    /// be given to a new account, or those orphans would count against it.
    fn ensure_name_not_orphaned(&self, name: &str) -> TrackerResult<()> {
        let name = name.trim();
        if self.accounts.contains(name) {
            return Ok(());
        }
        if self.transactions.iter().any(|t| t.references_account(name)) {
            return Err(TrackerError::DuplicateAccount(name.to_string()));
        }
        Ok(())
    }

    /// A label carried by orphaned transactions of a kind cannot become the
    /// new name of another category, or those orphans would be merged into it.
    fn ensure_category_not_orphaned(&self, name: &str, kind: TransactionKind) -> TrackerResult<()> {
        let name = name.trim();
        if self.categories.contains(name, kind) {
            return Ok(());
        }
        if self
            .transactions
            .iter()
            .any(|t| t.references_category(name, kind))
        {
            return Err(TrackerError::DuplicateCategory {
                name: name.to_string(),
                kind,
            });
        }
        Ok(())
    }

    /// Remove matching transactions, reversing their effect on any live account
    fn remove_transactions_where<F>(&mut self, predicate: F) -> TrackerResult<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let reversals = self
            .transactions
            .iter()
            .filter(|t| predicate(t))
            .filter_map(|t| {
                self.accounts
                    .slot(&t.account)
                    .map(|slot| (slot, -t.signed_amount()))
            });
        let balances = self.accounts.plan_balances(reversals)?;

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.transactions)
            .into_iter()
            .partition(|t| predicate(t));
        self.transactions = kept;
        self.accounts.apply_balances(balances);

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionDraft;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn seeded(policy: LedgerPolicy) -> Ledger {
        let mut ledger = Ledger::with_default_categories().with_policy(policy);
        ledger.create_account("Cash", cents(10000)).unwrap();
        ledger.create_account("Bank", cents(0)).unwrap();
        ledger
            .add_transaction(TransactionDraft::new(
                cents(5000),
                TransactionKind::Income,
                date(2024, 1, 10),
                "Salary",
                "Cash",
            ))
            .unwrap();
        ledger
            .add_transaction(TransactionDraft::new(
                cents(2000),
                TransactionKind::Expense,
                date(2024, 1, 15),
                "Food",
                "Bank",
            ))
            .unwrap();
        ledger
    }

    fn policy(account: DeletionPolicy, category: DeletionPolicy) -> LedgerPolicy {
        LedgerPolicy {
            account_deletion: account,
            category_deletion: category,
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = LedgerPolicy::default();
        assert_eq!(policy.account_deletion, DeletionPolicy::Cascade);
        assert_eq!(policy.category_deletion, DeletionPolicy::Reject);
    }

    #[test]
    fn test_rename_category_relabels_transactions() {
        let mut ledger = seeded(LedgerPolicy::default());
        ledger
            .rename_category("salary", TransactionKind::Income, "Wages")
            .unwrap();

        assert!(ledger.categories().contains("Wages", TransactionKind::Income));
        assert!(!ledger.categories().contains("Salary", TransactionKind::Income));
        assert_eq!(ledger.transactions()[0].category, "Wages");
    }

    #[test]
    fn test_rename_category_only_touches_its_kind() {
        let mut ledger = Ledger::with_default_categories();
        ledger.create_account("Cash", cents(0)).unwrap();
        ledger.add_category("Gift", TransactionKind::Expense).unwrap();
        ledger
            .add_transaction(TransactionDraft::new(
                cents(100),
                TransactionKind::Expense,
                date(2024, 3, 1),
                "Gift",
                "Cash",
            ))
            .unwrap();

        ledger
            .rename_category("Gift", TransactionKind::Income, "Present")
            .unwrap();
        assert_eq!(ledger.transactions()[0].category, "Gift");
    }

    #[test]
    fn test_remove_category_reject() {
        let mut ledger = seeded(LedgerPolicy::default());
        let before = ledger.clone();

        let err = ledger
            .remove_category("Food", TransactionKind::Expense)
            .unwrap_err();
        assert_eq!(
            err,
            TrackerError::InUse {
                entity_type: "Category",
                identifier: "Food".into(),
                count: 1
            }
        );
        assert_eq!(ledger, before);

        // Unused categories can always go
        ledger
            .remove_category("Transport", TransactionKind::Expense)
            .unwrap();
        assert!(!ledger.categories().contains("Transport", TransactionKind::Expense));
    }

    #[test]
    fn test_remove_category_cascade_reverses_balances() {
        let mut ledger = seeded(policy(DeletionPolicy::Cascade, DeletionPolicy::Cascade));
        let removal = ledger
            .remove_category("Food", TransactionKind::Expense)
            .unwrap();

        assert_eq!(removal.cascaded.len(), 1);
        assert_eq!(ledger.balance("Bank").unwrap(), cents(0));
        assert_eq!(ledger.transactions().len(), 1);
        ledger.verify_balances().unwrap();
    }

    #[test]
    fn test_remove_category_orphan_keeps_label() {
        let mut ledger = seeded(policy(DeletionPolicy::Cascade, DeletionPolicy::Orphan));
        let removal = ledger
            .remove_category("Food", TransactionKind::Expense)
            .unwrap();

        assert_eq!(removal.orphaned, 1);
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(ledger.transactions()[1].category, "Food");
        assert_eq!(ledger.balance("Bank").unwrap(), cents(-2000));
    }

    #[test]
    fn test_rename_category_onto_orphaned_label_is_rejected() {
        let mut ledger = seeded(policy(DeletionPolicy::Cascade, DeletionPolicy::Orphan));
        ledger
            .remove_category("Food", TransactionKind::Expense)
            .unwrap();
        let before = ledger.clone();

        assert!(matches!(
            ledger.rename_category("Transport", TransactionKind::Expense, "food"),
            Err(TrackerError::DuplicateCategory { .. })
        ));
        assert_eq!(ledger, before);

        // The same label is free under the other kind
        ledger
            .rename_category("Gift", TransactionKind::Income, "Food")
            .unwrap();
        assert_eq!(ledger.transactions()[1].category, "Food");
    }

    #[test]
    fn test_remove_account_cascade() {
        let mut ledger = seeded(LedgerPolicy::default());
        let removal = ledger.remove_account("cash").unwrap();

        assert_eq!(removal.cascaded.len(), 1);
        assert!(ledger.accounts().get("Cash").is_none());
        assert!(ledger.transactions().iter().all(|t| t.account != "Cash"));
        ledger.verify_balances().unwrap();
    }

    #[test]
    fn test_remove_account_reject() {
        let mut ledger = seeded(policy(DeletionPolicy::Reject, DeletionPolicy::Reject));
        let before = ledger.clone();

        assert!(matches!(
            ledger.remove_account("Cash"),
            Err(TrackerError::InUse { count: 1, .. })
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_remove_account_orphan_reserves_name() {
        let mut ledger = seeded(policy(DeletionPolicy::Orphan, DeletionPolicy::Reject));
        let removal = ledger.remove_account("Cash").unwrap();
        assert_eq!(removal.orphaned, 1);
        assert_eq!(ledger.transactions()[0].account, "Cash");

        // The stale label cannot be adopted by a new account
        assert!(matches!(
            ledger.create_account("cash", cents(0)),
            Err(TrackerError::DuplicateAccount(_))
        ));
        assert!(matches!(
            ledger.rename_account("Bank", "Cash"),
            Err(TrackerError::DuplicateAccount(_))
        ));
        ledger.verify_balances().unwrap();
    }

    #[test]
    fn test_remove_missing() {
        let mut ledger = seeded(LedgerPolicy::default());
        assert!(ledger.remove_account("Wallet").unwrap_err().is_not_found());
        assert!(ledger
            .remove_category("Rent", TransactionKind::Expense)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_rename_account_repoints_transactions() {
        let mut ledger = seeded(LedgerPolicy::default());
        ledger.rename_account("cash", "Wallet").unwrap();

        assert_eq!(ledger.balance("Wallet").unwrap(), cents(15000));
        assert_eq!(ledger.transactions()[0].account, "Wallet");
        assert!(ledger.balance("Cash").unwrap_err().is_not_found());
        ledger.verify_balances().unwrap();
    }

    #[test]
    fn test_rename_account_case_only() {
        let mut ledger = seeded(LedgerPolicy::default());
        let renamed = ledger.rename_account("Cash", "CASH").unwrap();
        assert_eq!(renamed.name, "CASH");
        assert_eq!(ledger.transactions()[0].account, "CASH");
    }

    #[test]
    fn test_from_parts_raises_next_id() {
        let ledger = seeded(LedgerPolicy::default());
        let rebuilt = Ledger::from_parts(
            ledger.categories().clone(),
            ledger.accounts().clone(),
            ledger.transactions().to_vec(),
            Some(TransactionId::new(1)),
        )
        .unwrap();
        assert_eq!(rebuilt.next_transaction_id(), TransactionId::new(3));

        let rebuilt = Ledger::from_parts(
            ledger.categories().clone(),
            ledger.accounts().clone(),
            ledger.transactions().to_vec(),
            Some(TransactionId::new(40)),
        )
        .unwrap();
        assert_eq!(rebuilt.next_transaction_id(), TransactionId::new(40));
    }

    #[test]
    fn test_from_parts_rejects_bad_balance() {
        let ledger = seeded(LedgerPolicy::default());
        let mut accounts = AccountRegistry::new();
        accounts.create("Cash", cents(10000)).unwrap();
        accounts.create("Bank", cents(0)).unwrap();

        let result = Ledger::from_parts(
            ledger.categories().clone(),
            accounts,
            ledger.transactions().to_vec(),
            None,
        );
        assert!(matches!(result, Err(TrackerError::CorruptState(_))));
    }
}
