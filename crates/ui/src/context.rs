use std::path::{Path, PathBuf};
use std::sync::Arc;

use services::LedgerService;

pub trait UiApp: Send + Sync {
    fn ledger(&self) -> Arc<LedgerService>;
    fn data_path(&self) -> Option<PathBuf>;
}

#[derive(Clone)]
pub struct AppContext {
    ledger: Arc<LedgerService>,
    data_path: Option<PathBuf>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            ledger: app.ledger(),
            data_path: app.data_path(),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<LedgerService> {
        Arc::clone(&self.ledger)
    }

    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
