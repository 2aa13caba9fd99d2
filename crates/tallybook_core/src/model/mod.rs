//! Domain records persisted by the record stores.
//!
//! # Responsibility
//! - Define the canonical `Expense` and `Todo` shapes shared by stores,
//!   reports and the HTTP boundary.
//! - Own create/merge validation so every caller gets the same rules.
//!
//! # Invariants
//! - Every record carries a stable, opaque string `id` assigned at creation.
//! - JSON field names are part of the external contract (`createdAt` included).

pub mod expense;
pub mod todo;

use uuid::Uuid;

/// Opaque record identifier, unique within one collection.
pub type RecordId = String;

/// Generates a fresh record identifier.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Returns `Some(value)` only when the optional input carries non-empty text.
///
/// Merge paths use this for fields where an empty string means "keep prior".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
