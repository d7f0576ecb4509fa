//! v001: isin_lei_map and lei_metadata.

use rusqlite::Connection;

use peermatch_core::errors::MatchResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MatchResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS isin_lei_map (
            isin  TEXT PRIMARY KEY,
            lei   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_isin_lei_map_lei ON isin_lei_map(lei);

        CREATE TABLE IF NOT EXISTS lei_metadata (
            lei                 TEXT PRIMARY KEY,
            registration_status TEXT NOT NULL DEFAULT '',
            entity_status       TEXT NOT NULL DEFAULT '',
            legal_name          TEXT NOT NULL DEFAULT '',
            city                TEXT NOT NULL DEFAULT '',
            country             TEXT NOT NULL DEFAULT '',
            category            TEXT NOT NULL DEFAULT '',
            description         TEXT,
            sector_labels       TEXT,
            enrichment_state    TEXT NOT NULL DEFAULT 'not_tried',
            enriched_at         TEXT
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
