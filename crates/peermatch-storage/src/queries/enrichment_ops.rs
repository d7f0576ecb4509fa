//! Writes for the one-way enrichment lifecycle.

use chrono::Utc;
use rusqlite::{params, Connection};

use peermatch_core::errors::{MatchError, MatchResult};

use crate::to_storage_err;

/// Persist a positive knowledge-base hit.
///
/// Idempotent: calling twice with identical data rewrites the same values.
/// Commits before returning (autocommit, single statement).
pub fn enrich_company(
    conn: &Connection,
    lei: &str,
    description: &str,
    labels: &[String],
) -> MatchResult<()> {
    let sector_labels = serde_json::to_string(labels)?;
    let rows = conn
        .execute(
            "UPDATE lei_metadata
             SET description = ?2,
                 sector_labels = ?3,
                 enrichment_state = 'enriched',
                 enriched_at = ?4
             WHERE lei = ?1",
            params![lei, description, sector_labels, Utc::now().to_rfc3339()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(MatchError::CompanyNotFound {
            key: lei.to_string(),
        });
    }
    Ok(())
}

/// Record a queried-but-empty outcome so the LEI is not re-queried.
///
/// The state guard keeps this from ever downgrading an enriched row;
/// repeat calls are no-ops.
pub fn mark_enrichment_attempted(conn: &Connection, lei: &str) -> MatchResult<()> {
    conn.execute(
        "UPDATE lei_metadata
         SET enrichment_state = 'tried_empty',
             enriched_at = ?2
         WHERE lei = ?1 AND enrichment_state = 'not_tried'",
        params![lei, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
