//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record-store calls into CRUD and report use cases.
//! - Translate validation and parameter failures into `ServiceError`.
//!
//! # Invariants
//! - Every mutation is load → modify → save of the whole collection.
//! - Services stay storage-agnostic behind `RecordStore`.

pub mod error;
pub mod expense_service;
pub mod todo_service;
