//! JSON flat-file store.
//!
//! # Responsibility
//! - Persist one collection as a pretty-printed JSON array in a single file.
//! - Replace the file atomically on save (write a uniquely named sibling
//!   temp file, then rename it over the target).
//!
//! # Invariants
//! - A missing file loads as an empty collection.
//! - An unreadable or corrupt file loads as an empty collection and is logged.
//! - A reader never observes a partially written file.
//! - Concurrent saves never share a temp file; the last rename wins.

use super::record_store::{RecordStore, StoreError, StoreResult};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = ".tmp";

/// File-backed store for one record collection.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prefix shared by every temp file of this store, e.g. `.expenses.json.`.
    fn temp_prefix(&self) -> OsString {
        let mut prefix = OsString::from(".");
        if let Some(name) = self.path.file_name() {
            prefix.push(name);
        }
        prefix.push(".");
        prefix
    }
}

impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Vec<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=repo status=ok path={} records=0 reason=missing_file",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=error path={} error_code=read_failed error={}",
                    self.path.display(),
                    err
                );
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                debug!(
                    "event=store_load module=repo status=ok path={} records={}",
                    self.path.display(),
                    records.len()
                );
                records
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=error path={} error_code=corrupt_data error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = write_atomically(&self.path, &self.temp_prefix(), records);

        match &result {
            Ok(()) => info!(
                "event=store_save module=repo status=ok path={} records={} duration_ms={}",
                self.path.display(),
                records.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=repo status=error path={} duration_ms={} error={}",
                self.path.display(),
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }
}

fn write_atomically<T: Serialize>(
    path: &Path,
    temp_prefix: &OsString,
    records: &[T],
) -> StoreResult<()> {
    let encoded = serde_json::to_string_pretty(records)?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(io_err)?;
            parent
        }
        None => Path::new("."),
    };

    // Dropping `temp` before `persist` removes the half-written file.
    let mut temp = tempfile::Builder::new()
        .prefix(temp_prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(io_err)?;
    temp.write_all(encoded.as_bytes()).map_err(io_err)?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}
