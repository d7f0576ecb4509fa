//! The single write connection, serialized behind a mutex.
//!
//! The pipeline is synchronous and single-threaded; one connection is
//! enough. `enrich_company` is idempotent, so a concurrent process racing
//! on the same LEI costs at worst a duplicate external lookup.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use peermatch_core::errors::MatchResult;

use crate::pool::pragmas;
use crate::to_storage_err;

/// Owns the writable connection to the identity database.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to a database file, applying pragmas.
    pub fn open(path: &Path) -> MatchResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory connection (for testing).
    pub fn open_in_memory() -> MatchResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the connection.
    pub fn with_conn<F, T>(&self, f: F) -> MatchResult<T>
    where
        F: FnOnce(&Connection) -> MatchResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned".to_string()))?;
        f(&conn)
    }
}
