//! Transaction filters
//!
//! Each filter borrows the ledger and yields matching transactions lazily,
//! in ledger order. Nothing is cached; every call walks the current list.

use chrono::NaiveDate;

use super::Ledger;
use crate::models::{names_match, Transaction, TransactionKind};

impl Ledger {
    /// Transactions labelled with a category name, of either kind
    pub fn filter_by_category<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |t| names_match(&t.category, name))
    }

    /// Transactions posted to an account
    pub fn filter_by_account<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |t| t.references_account(name))
    }

    pub fn filter_by_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.iter().filter(move |t| t.kind == kind)
    }

    /// Transactions dated within `start..=end`; empty when `start > end`
    pub fn filter_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .skip_while(move |t| t.date < start)
            .take_while(move |t| t.date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionDraft};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::with_default_categories();
        ledger.create_account("Cash", Money::from_cents(10000)).unwrap();
        ledger.create_account("Bank", Money::zero()).unwrap();

        let drafts = [
            (5000, TransactionKind::Income, date(2024, 1, 10), "Salary", "Cash"),
            (2000, TransactionKind::Expense, date(2024, 1, 15), "Food", "Bank"),
            (1500, TransactionKind::Expense, date(2024, 2, 3), "Food", "Cash"),
            (700, TransactionKind::Expense, date(2024, 1, 2), "Transport", "Cash"),
        ];
        for (amount, kind, on, category, account) in drafts {
            ledger
                .add_transaction(TransactionDraft::new(
                    Money::from_cents(amount),
                    kind,
                    on,
                    category,
                    account,
                ))
                .unwrap();
        }
        ledger
    }

    fn ids<'a>(iter: impl Iterator<Item = &'a Transaction>) -> Vec<u64> {
        iter.map(|t| t.id.value()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let ledger = sample_ledger();
        assert_eq!(ids(ledger.filter_by_category("food")), vec![2, 3]);
        assert!(ledger.filter_by_category("Rent").next().is_none());
    }

    #[test]
    fn test_filter_by_account() {
        let ledger = sample_ledger();
        assert_eq!(ids(ledger.filter_by_account("CASH")), vec![4, 1, 3]);
        assert_eq!(ids(ledger.filter_by_account("Bank")), vec![2]);
    }

    #[test]
    fn test_filter_by_kind() {
        let ledger = sample_ledger();
        assert_eq!(ids(ledger.filter_by_kind(TransactionKind::Income)), vec![1]);
        assert_eq!(ledger.filter_by_kind(TransactionKind::Expense).count(), 3);
    }

    #[test]
    fn test_filter_by_date_range() {
        let ledger = sample_ledger();
        assert_eq!(
            ids(ledger.filter_by_date_range(date(2024, 1, 10), date(2024, 1, 31))),
            vec![1, 2]
        );
        assert_eq!(
            ledger
                .filter_by_date_range(date(2024, 2, 1), date(2024, 1, 1))
                .count(),
            0
        );
    }

    #[test]
    fn test_filters_see_later_mutations() {
        let mut ledger = sample_ledger();
        assert_eq!(ledger.filter_by_category("Food").count(), 2);
        ledger
            .delete_transaction(crate::models::TransactionId::new(2))
            .unwrap();
        assert_eq!(ledger.filter_by_category("Food").count(), 1);
    }
}
