//! Recent expense templates ("tags") used to prefill new expenses.

use super::period::recent_expenses;
use super::template::{ExpenseTemplate, TemplateKey};
use crate::model::expense::Expense;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Distinct templates seen in the trailing window, first occurrence first.
pub fn extract_tags(expenses: &[Expense], months: u32, today: NaiveDate) -> Vec<ExpenseTemplate> {
    let mut seen: HashSet<TemplateKey> = HashSet::new();
    recent_expenses(expenses, months, today)
        .filter(|expense| seen.insert(TemplateKey::of(expense)))
        .map(ExpenseTemplate::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract_tags;
    use crate::model::expense::Expense;
    use chrono::NaiveDate;

    fn expense(date: (i32, u32, u32), amount: f64, description: &str, notes: &str) -> Expense {
        Expense {
            id: description.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            category: "Bills".to_string(),
            description: description.to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn first_occurrence_wins_and_single_hits_qualify() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let expenses = vec![
            expense((2024, 5, 1), 30.0, "Phone", "first"),
            expense((2024, 6, 1), 30.0, "Phone", "second"),
            expense((2024, 6, 3), 12.0, "Gym", ""),
        ];

        let tags = extract_tags(&expenses, 2, today);
        let names: Vec<&str> = tags.iter().map(|tag| tag.description.as_str()).collect();
        assert_eq!(names, vec!["Phone", "Gym"]);
    }

    #[test]
    fn window_excludes_older_months() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let expenses = vec![
            expense((2024, 3, 31), 30.0, "Old", ""),
            expense((2024, 4, 1), 30.0, "Edge", ""),
        ];

        let tags = extract_tags(&expenses, 2, today);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].description, "Edge");
    }
}
