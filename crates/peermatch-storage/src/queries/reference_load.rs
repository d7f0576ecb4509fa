//! Write path for bulk reference rows (loader and test seam).

use rusqlite::{params, Connection};

use peermatch_core::errors::MatchResult;
use peermatch_core::models::Company;
use peermatch_core::Isin;

use crate::to_storage_err;

/// Insert a reference row. Existing rows are left untouched.
pub fn insert_company(conn: &Connection, company: &Company) -> MatchResult<()> {
    let sector_labels = serde_json::to_string(&company.sector_labels)?;
    conn.execute(
        "INSERT OR IGNORE INTO lei_metadata (
            lei, registration_status, entity_status, legal_name,
            city, country, category, description, sector_labels,
            enrichment_state, enriched_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            company.lei,
            company.registration_status,
            company.entity_status,
            company.legal_name,
            company.city,
            company.country,
            company.category,
            company.description,
            sector_labels,
            company.enrichment_state.as_str(),
            company.enriched_at.map(|t| t.to_rfc3339()),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Map an ISIN to a LEI (n:1). Existing mappings are left untouched.
pub fn map_isin(conn: &Connection, isin: &Isin, lei: &str) -> MatchResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO isin_lei_map (isin, lei) VALUES (?1, ?2)",
        params![isin.as_str(), lei],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
