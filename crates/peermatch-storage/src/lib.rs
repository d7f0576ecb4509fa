//! # peermatch-storage
//!
//! SQLite identity store: connection handling, pragmas, versioned
//! migrations, query modules, and the [`StorageEngine`] production
//! adapter for `ICompanyStore`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use peermatch_core::errors::StorageError;
use peermatch_core::MatchError;

/// Wrap a driver error message into the storage error type.
pub(crate) fn to_storage_err(message: String) -> MatchError {
    StorageError::SqliteError { message }.into()
}
