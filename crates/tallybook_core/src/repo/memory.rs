//! In-process store backed by a mutex-guarded vector.

use super::record_store::{RecordStore, StoreResult};
use std::sync::Mutex;

/// Volatile store, used by tests and one-shot tooling.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> RecordStore<T> for MemoryStore<T> {
    fn load(&self) -> Vec<T> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let mut guard = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = records.to_vec();
        Ok(())
    }
}
