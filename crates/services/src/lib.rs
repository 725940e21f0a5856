#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod ledger_service;

pub use app_services::AppServices;
pub use error::LedgerServiceError;
pub use ledger_service::LedgerService;
