//! Shared error types for the services crate.

use thiserror::Error;

use attendance_core::model::{LedgerError, RecordError};
use storage::repository::StorageError;

/// Errors emitted by `LedgerService`.
///
/// Every variant except `Storage` means the request was rejected and nothing
/// changed. `Storage` means the change was applied in memory but could not be
/// written.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerServiceError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LedgerServiceError {
    /// True when the in-memory state was left untouched.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
