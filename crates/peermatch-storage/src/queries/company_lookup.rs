//! ISIN/LEI lookups joining the identifier mapping to entity metadata.

use rusqlite::{params, Connection, OptionalExtension, Row};

use peermatch_core::errors::MatchResult;
use peermatch_core::models::{Company, EnrichmentState};
use peermatch_core::Isin;

use crate::to_storage_err;

/// Column list shared by every company SELECT; `row_to_company` reads
/// columns in this order.
pub(crate) const COMPANY_COLUMNS: &str = "m.lei, m.registration_status, m.entity_status, \
     m.legal_name, m.city, m.country, m.category, \
     m.description, m.sector_labels, m.enrichment_state, m.enriched_at";

/// Resolve an ISIN through the mapping table.
pub fn get_by_isin(conn: &Connection, isin: &Isin) -> MatchResult<Option<Company>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COMPANY_COLUMNS}
             FROM isin_lei_map im
             JOIN lei_metadata m ON im.lei = m.lei
             WHERE im.isin = ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![isin.as_str()], |row| Ok(row_to_company(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// Batched resolve. ISINs with no mapping or no entity row are absent from
/// the result; each pair carries the matched ISIN.
pub fn get_by_isins(conn: &Connection, isins: &[Isin]) -> MatchResult<Vec<(Isin, Company)>> {
    if isins.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = (1..=isins.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COMPANY_COLUMNS}, im.isin
             FROM isin_lei_map im
             JOIN lei_metadata m ON im.lei = m.lei
             WHERE im.isin IN ({placeholders})"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(isins.iter().map(Isin::as_str)),
            |row| {
                let isin: String = row.get(11)?;
                Ok((isin, row_to_company(row)))
            },
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut companies = Vec::with_capacity(isins.len());
    for row in rows {
        let (isin, company) = row.map_err(|e| to_storage_err(e.to_string()))?;
        companies.push((Isin::parse(&isin)?, company?));
    }
    Ok(companies)
}

/// Direct lookup by LEI.
pub fn get_by_lei(conn: &Connection, lei: &str) -> MatchResult<Option<Company>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COMPANY_COLUMNS} FROM lei_metadata m WHERE m.lei = ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![lei], |row| Ok(row_to_company(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// Bounded scan, administrative use only.
pub fn list_all(conn: &Connection, limit: usize) -> MatchResult<Vec<Company>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COMPANY_COLUMNS} FROM lei_metadata m LIMIT ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit], |row| Ok(row_to_company(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut companies = Vec::new();
    for row in rows {
        companies.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(companies)
}

/// Parse a row in `COMPANY_COLUMNS` order into a Company.
pub(crate) fn row_to_company(row: &Row<'_>) -> MatchResult<Company> {
    let sector_labels_json: Option<String> = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let sector_labels: Vec<String> = match sector_labels_json.as_deref() {
        Some(json) if !json.is_empty() => serde_json::from_str(json)
            .map_err(|e| to_storage_err(format!("parse sector_labels: {e}")))?,
        _ => Vec::new(),
    };

    let state_str: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;
    let enrichment_state = EnrichmentState::parse(&state_str).unwrap_or_else(|| {
        tracing::warn!(state = %state_str, "unknown enrichment state, treating as not_tried");
        EnrichmentState::NotTried
    });

    let enriched_at_str: Option<String> = row.get(10).map_err(|e| to_storage_err(e.to_string()))?;
    let enriched_at = enriched_at_str
        .as_deref()
        .map(|s| {
            chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| to_storage_err(format!("parse enriched_at '{s}': {e}")))
        })
        .transpose()?;

    Ok(Company {
        lei: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        registration_status: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        entity_status: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        legal_name: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        city: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        country: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        category: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        description: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        sector_labels,
        enrichment_state,
        enriched_at,
    })
}
