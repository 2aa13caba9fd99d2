//! Todo domain model.
//!
//! # Invariants
//! - `text` is never empty for a stored record.
//! - `created_at` is set once at creation and never changed by updates.

use super::{new_record_id, non_empty, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: RecordId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Create request for a new todo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Partial update request. Empty `text` keeps the prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Validation failure for todo inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyText,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo field `text` is required"),
        }
    }
}

impl Error for TodoValidationError {}

impl Todo {
    /// Builds a new open todo stamped with the current time.
    pub fn from_draft(draft: TodoDraft) -> Result<Self, TodoValidationError> {
        let text = non_empty(draft.text).ok_or(TodoValidationError::EmptyText)?;
        Ok(Self {
            id: new_record_id(),
            text,
            completed: draft.completed.unwrap_or(false),
            created_at: Utc::now(),
        })
    }

    pub fn apply_patch(&mut self, patch: TodoPatch) {
        if let Some(text) = non_empty(patch.text) {
            self.text = text;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoDraft, TodoPatch, TodoValidationError};

    #[test]
    fn serializes_created_at_in_camel_case() {
        let todo = Todo::from_draft(TodoDraft {
            text: Some("water plants".to_string()),
            completed: None,
        })
        .unwrap();
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = Todo::from_draft(TodoDraft::default()).unwrap_err();
        assert_eq!(err, TodoValidationError::EmptyText);
    }

    #[test]
    fn patch_never_touches_created_at() {
        let mut todo = Todo::from_draft(TodoDraft {
            text: Some("draft".to_string()),
            completed: None,
        })
        .unwrap();
        let created_at = todo.created_at;

        todo.apply_patch(TodoPatch {
            text: Some(String::new()),
            completed: Some(true),
        });

        assert_eq!(todo.text, "draft");
        assert!(todo.completed);
        assert_eq!(todo.created_at, created_at);
    }
}
