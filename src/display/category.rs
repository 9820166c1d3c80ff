//! Category display formatting
//!
//! Formats categories as a tree grouped by kind.

use crate::models::{Category, TransactionKind};

/// Format categories as a tree, income first
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();

    for (i, kind) in TransactionKind::ALL.iter().enumerate() {
        let names: Vec<&str> = categories
            .iter()
            .filter(|c| c.kind == *kind)
            .map(|c| c.name.as_str())
            .collect();

        output.push_str(match kind {
            TransactionKind::Income => "Income\n",
            TransactionKind::Expense => "Expense\n",
        });
        output.push_str(&format_names(&names));

        if i + 1 < TransactionKind::ALL.len() {
            output.push('\n');
        }
    }

    output
}

/// Format the categories of a single kind
pub fn format_category_list(names: &[String]) -> String {
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    format_names(&names)
}

fn format_names(names: &[&str]) -> String {
    if names.is_empty() {
        return "  (no categories)\n".to_string();
    }

    let mut output = String::new();
    for (j, name) in names.iter().enumerate() {
        let prefix = if j + 1 == names.len() {
            "└── "
        } else {
            "├── "
        };
        output.push_str(&format!("  {}{}\n", prefix, name));
    }
    output
}
