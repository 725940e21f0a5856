use async_trait::async_trait;
use attendance_core::model::Record;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonFileRepository;

/// Errors surfaced by storage adapters.
///
/// Reading never fails: unreadable or corrupt data is recovered into a valid
/// `Record`. Only writes report errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("internal storage error: {0}")]
    Internal(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Load/save contract for the whole attendance record.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Load the stored record, falling back to defaults on absence or
    /// corruption.
    async fn load(&self) -> Record;

    /// Replace the stored record with `record`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, record: &Record) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    record: Arc<Mutex<Option<Record>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `record` already stored.
    #[must_use]
    pub fn with_record(record: Record) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(record))),
        }
    }

    /// The last saved record, if any.
    #[must_use]
    pub fn stored(&self) -> Option<Record> {
        self.record.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl RecordRepository for InMemoryRepository {
    async fn load(&self) -> Record {
        self.stored().unwrap_or_default()
    }

    async fn save(&self, record: &Record) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }
}

/// Repository handle behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn RecordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            records: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Storage backed by a JSON document at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            records: Arc::new(JsonFileRepository::new(path)),
        }
    }
}
