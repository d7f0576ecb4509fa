//! Versioned schema migrations, applied at engine open.
//!
//! `PRAGMA user_version` tracks the last applied version.

mod v001_identity_tables;

use rusqlite::Connection;

use peermatch_core::errors::{MatchResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> MatchResult<()>;

/// Migrations in order.
const MIGRATIONS: &[(u32, Migration)] = &[(1, v001_identity_tables::migrate)];

/// Apply every migration newer than the database's current version.
pub fn run_migrations(conn: &Connection) -> MatchResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        if let Err(e) = migrate(conn) {
            return Err(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            }
            .into());
        }
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(version, "applied migration");
    }
    Ok(())
}
