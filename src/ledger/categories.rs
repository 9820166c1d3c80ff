//! Category registry
//!
//! Two disjoint name lists, one per transaction kind. Names are unique
//! within a kind (case-insensitive, after trimming) and keep the casing
//! they were registered with.

use crate::error::{TrackerError, TrackerResult};
use crate::models::{names_match, Category, TransactionKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    income: Vec<String>,
    expense: Vec<String>,
}

impl CategoryRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the default categories of both kinds
    pub fn with_defaults() -> Self {
        let to_owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            income: to_owned(Category::defaults(TransactionKind::Income)),
            expense: to_owned(Category::defaults(TransactionKind::Expense)),
        }
    }

    /// Build a registry from stored name lists, rejecting blanks and duplicates
    pub fn from_lists(income: Vec<String>, expense: Vec<String>) -> TrackerResult<Self> {
        let mut registry = Self::new();
        for name in income {
            registry.add(&name, TransactionKind::Income)?;
        }
        for name in expense {
            registry.add(&name, TransactionKind::Expense)?;
        }
        Ok(registry)
    }

    fn names_mut(&mut self, kind: TransactionKind) -> &mut Vec<String> {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expense,
        }
    }

    /// Category names of a kind, in registration order
    pub fn list(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    /// Every category of both kinds, income first
    pub fn all(&self) -> impl Iterator<Item = Category> + '_ {
        TransactionKind::ALL.into_iter().flat_map(move |kind| {
            self.list(kind)
                .iter()
                .map(move |name| Category::new(name.clone(), kind))
        })
    }

    /// Registered spelling of a category name, if present under `kind`
    pub fn find(&self, name: &str, kind: TransactionKind) -> Option<&str> {
        self.list(kind)
            .iter()
            .find(|existing| names_match(existing, name))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str, kind: TransactionKind) -> bool {
        self.find(name, kind).is_some()
    }

    /// Register a category; returns the stored (trimmed) name
    pub fn add(&mut self, name: &str, kind: TransactionKind) -> TrackerResult<String> {
        let name = validate_name(name)?;
        if self.contains(&name, kind) {
            return Err(TrackerError::DuplicateCategory { name, kind });
        }
        self.names_mut(kind).push(name.clone());
        Ok(name)
    }

    /// Rename a category in place, keeping its position
    ///
    /// A case-only rename of the same category is allowed.
    pub fn rename(
        &mut self,
        old_name: &str,
        kind: TransactionKind,
        new_name: &str,
    ) -> TrackerResult<String> {
        let new_name = validate_name(new_name)?;

        let index = self
            .list(kind)
            .iter()
            .position(|existing| names_match(existing, old_name))
            .ok_or_else(|| TrackerError::category_not_found(old_name.trim()))?;

        let clash = self
            .list(kind)
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && names_match(existing, &new_name));
        if clash {
            return Err(TrackerError::DuplicateCategory {
                name: new_name,
                kind,
            });
        }

        self.names_mut(kind)[index] = new_name.clone();
        Ok(new_name)
    }

    /// Remove a category from the registry
    ///
    /// Dependent transactions are the ledger's concern; see `Ledger::remove_category`.
    pub fn remove(&mut self, name: &str, kind: TransactionKind) -> TrackerResult<String> {
        let names = self.names_mut(kind);
        let index = names
            .iter()
            .position(|existing| names_match(existing, name))
            .ok_or_else(|| TrackerError::category_not_found(name.trim()))?;
        Ok(names.remove(index))
    }
}

fn validate_name(name: &str) -> TrackerResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::Validation(
            "Category name cannot be empty".into(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = CategoryRegistry::with_defaults();
        assert_eq!(registry.list(TransactionKind::Income).len(), 5);
        assert_eq!(registry.list(TransactionKind::Expense).len(), 7);
        assert!(registry.contains("salary", TransactionKind::Income));
        assert!(!registry.contains("Salary", TransactionKind::Expense));
        assert_eq!(registry.all().count(), 12);
    }

    #[test]
    fn test_add_trims_and_keeps_case() {
        let mut registry = CategoryRegistry::new();
        let stored = registry.add("  Rent ", TransactionKind::Expense).unwrap();
        assert_eq!(stored, "Rent");
        assert_eq!(registry.find("RENT", TransactionKind::Expense), Some("Rent"));
    }

    #[test]
    fn test_add_duplicate() {
        let mut registry = CategoryRegistry::with_defaults();
        let err = registry.add(" food ", TransactionKind::Expense).unwrap_err();
        assert_eq!(
            err,
            TrackerError::DuplicateCategory {
                name: "food".into(),
                kind: TransactionKind::Expense
            }
        );

        // The same name under the other kind is a different category
        registry.add("Food", TransactionKind::Income).unwrap();
    }

    #[test]
    fn test_add_blank() {
        let mut registry = CategoryRegistry::new();
        assert!(registry.add("   ", TransactionKind::Income).unwrap_err().is_validation());
    }

    #[test]
    fn test_rename() {
        let mut registry = CategoryRegistry::with_defaults();
        registry
            .rename("bills", TransactionKind::Expense, "Utilities")
            .unwrap();
        assert!(registry.contains("Utilities", TransactionKind::Expense));
        assert!(!registry.contains("Bills", TransactionKind::Expense));
        // Position is preserved
        assert_eq!(registry.list(TransactionKind::Expense)[3], "Utilities");

        registry
            .rename("utilities", TransactionKind::Expense, "UTILITIES")
            .unwrap();
        assert_eq!(registry.list(TransactionKind::Expense)[3], "UTILITIES");
    }

    #[test]
    fn test_rename_errors() {
        let mut registry = CategoryRegistry::with_defaults();
        assert!(registry
            .rename("Rent", TransactionKind::Expense, "Housing")
            .unwrap_err()
            .is_not_found());
        assert!(matches!(
            registry.rename("Food", TransactionKind::Expense, "bills"),
            Err(TrackerError::DuplicateCategory { .. })
        ));
    }

    #[test]
    fn test_remove() {
        let mut registry = CategoryRegistry::with_defaults();
        assert_eq!(
            registry.remove("GIFT", TransactionKind::Income).unwrap(),
            "Gift"
        );
        assert!(!registry.contains("Gift", TransactionKind::Income));
        assert!(registry
            .remove("Gift", TransactionKind::Income)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_from_lists_rejects_duplicates() {
        let result = CategoryRegistry::from_lists(
            vec!["Salary".into(), "salary".into()],
            vec![],
        );
        assert!(matches!(result, Err(TrackerError::DuplicateCategory { .. })));
    }
}
