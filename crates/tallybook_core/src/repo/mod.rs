//! Record store contracts and flat-file persistence.
//!
//! # Responsibility
//! - Define the load-all/save-all contract each collection is stored through.
//! - Keep file layout and JSON encoding details out of services.
//!
//! # Invariants
//! - `load` never fails the caller; missing or corrupt data reads as empty.
//! - `save` replaces the whole collection and reports failures as `StoreError`.

pub mod json_file;
pub mod memory;
pub mod record_store;
