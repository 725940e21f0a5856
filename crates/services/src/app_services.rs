use std::path::{Path, PathBuf};
use std::sync::Arc;

use storage::repository::Storage;

use crate::ledger_service::LedgerService;

/// Assembles app-facing services over a chosen storage backend.
#[derive(Clone)]
pub struct AppServices {
    data_path: Option<PathBuf>,
    ledger: Arc<LedgerService>,
}

impl AppServices {
    /// Build services backed by the JSON data file at `path`.
    pub async fn new_json_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let storage = Storage::json_file(path.clone());
        let ledger = Arc::new(LedgerService::open(Arc::clone(&storage.records)).await);
        Self {
            data_path: Some(path),
            ledger,
        }
    }

    /// Build services over an already constructed storage (tests, previews).
    pub async fn from_storage(storage: &Storage) -> Self {
        let ledger = Arc::new(LedgerService::open(Arc::clone(&storage.records)).await);
        Self {
            data_path: None,
            ledger,
        }
    }

    /// Where data is written, when backed by a file.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<LedgerService> {
        Arc::clone(&self.ledger)
    }
}
