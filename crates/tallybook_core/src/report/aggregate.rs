//! Monthly rollups, month comparison and recurring-expense detection.

use super::period::{recent_expenses, MonthKey};
use super::template::{ExpenseTemplate, TemplateKey};
use crate::model::expense::Expense;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A template must appear in at least this many distinct months to recur.
pub const MIN_RECURRING_MONTHS: usize = 2;

/// Totals for one month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub total: f64,
    pub categories: BTreeMap<String, f64>,
}

impl MonthlyBucket {
    fn add(&mut self, expense: &Expense) {
        self.total += expense.amount;
        *self
            .categories
            .entry(expense.category.clone())
            .or_insert(0.0) += expense.amount;
    }
}

/// Month key → bucket, iterated in ascending (chronological) key order.
pub type MonthlyReport = BTreeMap<MonthKey, MonthlyBucket>;

/// One side of a month comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparedMonth {
    pub total: f64,
    pub categories: BTreeMap<String, f64>,
    /// Matching expenses in stored order.
    pub details: Vec<Expense>,
}

/// Requested month key → comparison entry. Always holds every requested key.
pub type MonthComparison = BTreeMap<MonthKey, ComparedMonth>;

/// Rolls every expense up into its month.
pub fn monthly_report(expenses: &[Expense]) -> MonthlyReport {
    expenses
        .iter()
        .fold(MonthlyReport::new(), |mut report, expense| {
            report
                .entry(MonthKey::of(expense.date))
                .or_default()
                .add(expense);
            report
        })
}

/// Compares two months side by side.
///
/// Both months are present in the result even when no expense falls in
/// them; equal keys collapse into a single entry.
pub fn compare_months(
    expenses: &[Expense],
    month1: &MonthKey,
    month2: &MonthKey,
) -> MonthComparison {
    let mut comparison = MonthComparison::new();
    comparison.insert(month1.clone(), ComparedMonth::default());
    comparison.insert(month2.clone(), ComparedMonth::default());

    for expense in expenses {
        if let Some(entry) = comparison.get_mut(&MonthKey::of(expense.date)) {
            entry.total += expense.amount;
            *entry
                .categories
                .entry(expense.category.clone())
                .or_insert(0.0) += expense.amount;
            entry.details.push(expense.clone());
        }
    }

    comparison
}

/// Templates seen in at least `MIN_RECURRING_MONTHS` distinct months of the
/// trailing window, in order of first occurrence.
pub fn recurring_expenses(
    expenses: &[Expense],
    months: u32,
    today: NaiveDate,
) -> Vec<ExpenseTemplate> {
    let mut index: HashMap<TemplateKey, usize> = HashMap::new();
    let mut groups: Vec<(ExpenseTemplate, BTreeSet<MonthKey>)> = Vec::new();

    for expense in recent_expenses(expenses, months, today) {
        let slot = *index.entry(TemplateKey::of(expense)).or_insert_with(|| {
            groups.push((ExpenseTemplate::from(expense), BTreeSet::new()));
            groups.len() - 1
        });
        groups[slot].1.insert(MonthKey::of(expense.date));
    }

    groups
        .into_iter()
        .filter(|(_, seen_in)| seen_in.len() >= MIN_RECURRING_MONTHS)
        .map(|(template, _)| template)
        .collect()
}
