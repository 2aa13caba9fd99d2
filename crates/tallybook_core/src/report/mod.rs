//! Derived, read-only reports over expense snapshots.
//!
//! # Responsibility
//! - Monthly rollups, two-month comparison, recurring-charge detection and
//!   recent-template (tag) extraction.
//! - Parse and validate the report parameters callers pass in as text.
//!
//! # Invariants
//! - Every report function is pure: it reads a snapshot and allocates its
//!   output, never touching storage.
//! - Month grouping always goes through `MonthKey::of`; template grouping
//!   always goes through `TemplateKey::of`.

pub mod aggregate;
pub mod period;
pub mod tags;
pub mod template;
