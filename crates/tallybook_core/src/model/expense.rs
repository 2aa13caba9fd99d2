//! Expense domain model.
//!
//! # Responsibility
//! - Define the persisted expense record and its create/update inputs.
//! - Validate required fields and amount parsing before a record is stored.
//!
//! # Invariants
//! - `amount` is always finite.
//! - `category` is never empty for a stored record.
//! - `date` is a calendar date without time or zone.

use super::{new_record_id, non_empty, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
}

/// Amount as accepted from callers: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Resolves the input into a finite amount.
    pub fn resolve(&self) -> Result<f64, ExpenseValidationError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ExpenseValidationError::InvalidAmount(text.clone()))?,
        };
        if !value.is_finite() {
            return Err(ExpenseValidationError::InvalidAmount(value.to_string()));
        }
        Ok(value)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Create request for a new expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub date: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Partial update request for an existing expense.
///
/// `date`, `category` and `description` keep the prior value when absent or
/// empty. `amount` and `notes` replace the prior value whenever present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub date: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Validation failure for expense inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    MissingField(&'static str),
    InvalidDate(String),
    InvalidAmount(String),
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "expense field `{field}` is required"),
            Self::InvalidDate(value) => {
                write!(f, "invalid expense date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidAmount(value) => write!(f, "invalid expense amount `{value}`"),
        }
    }
}

impl Error for ExpenseValidationError {}

impl Expense {
    /// Builds a new expense with a generated id from a create request.
    ///
    /// # Errors
    /// - `MissingField` when `date`, `amount` or `category` is absent or empty.
    /// - `InvalidDate` / `InvalidAmount` when present values do not parse.
    pub fn from_draft(draft: ExpenseDraft) -> Result<Self, ExpenseValidationError> {
        let date = non_empty(draft.date).ok_or(ExpenseValidationError::MissingField("date"))?;
        let amount = draft
            .amount
            .ok_or(ExpenseValidationError::MissingField("amount"))?;
        let category =
            non_empty(draft.category).ok_or(ExpenseValidationError::MissingField("category"))?;

        Ok(Self {
            id: new_record_id(),
            date: parse_date(&date)?,
            amount: amount.resolve()?,
            category,
            description: draft.description.unwrap_or_default(),
            notes: draft.notes.unwrap_or_default(),
        })
    }

    /// Applies a partial update.
    ///
    /// The record is left untouched when any provided value fails validation.
    pub fn apply_patch(&mut self, patch: ExpensePatch) -> Result<(), ExpenseValidationError> {
        let date = match non_empty(patch.date) {
            Some(raw) => parse_date(&raw)?,
            None => self.date,
        };
        let amount = match patch.amount {
            Some(input) => input.resolve()?,
            None => self.amount,
        };

        self.date = date;
        self.amount = amount;
        if let Some(category) = non_empty(patch.category) {
            self.category = category;
        }
        if let Some(description) = non_empty(patch.description) {
            self.description = description;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ExpenseValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseValidationError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{AmountInput, Expense, ExpenseDraft, ExpensePatch, ExpenseValidationError};
    use chrono::NaiveDate;

    fn draft() -> ExpenseDraft {
        ExpenseDraft {
            date: Some("2024-03-01".to_string()),
            amount: Some(AmountInput::Number(12.5)),
            category: Some("Food".to_string()),
            description: Some("Lunch".to_string()),
            notes: None,
        }
    }

    #[test]
    fn from_draft_defaults_notes_and_assigns_id() {
        let expense = Expense::from_draft(draft()).unwrap();
        assert!(!expense.id.is_empty());
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(expense.notes, "");
    }

    #[test]
    fn from_draft_rejects_missing_category() {
        let mut input = draft();
        input.category = Some(String::new());
        let err = Expense::from_draft(input).unwrap_err();
        assert_eq!(err, ExpenseValidationError::MissingField("category"));
    }

    #[test]
    fn amount_accepts_numeric_strings_and_rejects_garbage() {
        assert_eq!(AmountInput::Text(" 7.25 ".to_string()).resolve().unwrap(), 7.25);
        assert!(AmountInput::Text("abc".to_string()).resolve().is_err());
        assert!(AmountInput::Text("NaN".to_string()).resolve().is_err());
    }

    #[test]
    fn patch_keeps_prior_values_for_empty_text_but_replaces_notes() {
        let mut expense = Expense::from_draft(draft()).unwrap();
        expense.notes = "old".to_string();

        expense
            .apply_patch(ExpensePatch {
                category: Some(String::new()),
                notes: Some(String::new()),
                amount: Some(AmountInput::Number(0.0)),
                ..ExpensePatch::default()
            })
            .unwrap();

        assert_eq!(expense.category, "Food");
        assert_eq!(expense.notes, "");
        assert_eq!(expense.amount, 0.0);
    }

    #[test]
    fn failed_patch_leaves_record_unchanged() {
        let mut expense = Expense::from_draft(draft()).unwrap();
        let before = expense.clone();

        let err = expense
            .apply_patch(ExpensePatch {
                date: Some("2024-04-02".to_string()),
                amount: Some(AmountInput::Text("twelve".to_string())),
                ..ExpensePatch::default()
            })
            .unwrap_err();

        assert!(matches!(err, ExpenseValidationError::InvalidAmount(_)));
        assert_eq!(expense, before);
    }
}
