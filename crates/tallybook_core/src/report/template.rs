//! Expense templates: the `(description, category, amount)` identity of a
//! repeating charge, independent of date, id and notes.

use crate::model::expense::Expense;
use serde::{Deserialize, Serialize};

/// Grouping key for "the same charge".
///
/// Matching is exact: no case folding or whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    description: String,
    category: String,
    amount_bits: u64,
}

impl TemplateKey {
    pub fn of(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            category: expense.category.clone(),
            // -0.0 and 0.0 are the same charge.
            amount_bits: (expense.amount + 0.0).to_bits(),
        }
    }
}

/// Public projection of a template, as returned by the recurring and tag
/// reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTemplate {
    pub description: String,
    pub category: String,
    pub amount: f64,
}

impl From<&Expense> for ExpenseTemplate {
    fn from(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            category: expense.category.clone(),
            amount: expense.amount,
        }
    }
}
