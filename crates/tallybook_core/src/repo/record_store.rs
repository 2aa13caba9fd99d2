//! Store trait and error type shared by every collection backend.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure raised by `RecordStore::save`.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage io failure at `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode records: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Ordered collection storage with whole-collection read/write semantics.
pub trait RecordStore<T> {
    /// Returns every stored record in persisted order.
    fn load(&self) -> Vec<T>;
    /// Replaces the stored collection with `records`.
    fn save(&self, records: &[T]) -> StoreResult<()>;
}
