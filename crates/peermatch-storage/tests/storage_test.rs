use peermatch_core::models::{Company, EnrichmentState};
use peermatch_core::traits::ICompanyStore;
use peermatch_core::{Isin, MatchError};
use peermatch_storage::StorageEngine;

fn company(lei: &str, name: &str) -> Company {
    Company {
        lei: lei.to_string(),
        registration_status: "ISSUED".to_string(),
        entity_status: "ACTIVE".to_string(),
        legal_name: name.to_string(),
        city: "Zurich".to_string(),
        country: "CH".to_string(),
        category: "GENERAL".to_string(),
        description: None,
        sector_labels: Vec::new(),
        enrichment_state: EnrichmentState::NotTried,
        enriched_at: None,
    }
}

fn isin(raw: &str) -> Isin {
    Isin::parse(raw).expect("test ISIN is valid")
}

fn seeded_store() -> StorageEngine {
    let store = StorageEngine::open_in_memory().expect("in-memory storage");
    store.insert_company(&company("LEI00000000000000001", "Alpha AG")).unwrap();
    store.insert_company(&company("LEI00000000000000002", "Beta SA")).unwrap();
    store.map_isin(&isin("CH0000000001"), "LEI00000000000000001").unwrap();
    store.map_isin(&isin("CH0000000002"), "LEI00000000000000002").unwrap();
    // Two instruments of the same issuer (n:1 mapping).
    store.map_isin(&isin("US0000000003"), "LEI00000000000000001").unwrap();
    store
}

#[test]
fn get_by_isin_resolves_through_mapping() {
    let store = seeded_store();
    let found = store.get_by_isin(&isin("CH0000000001")).unwrap();
    assert_eq!(found.legal_name, "Alpha AG");
    assert_eq!(found.enrichment_state, EnrichmentState::NotTried);
}

#[test]
fn two_isins_can_share_one_lei() {
    let store = seeded_store();
    let a = store.get_by_isin(&isin("CH0000000001")).unwrap();
    let b = store.get_by_isin(&isin("US0000000003")).unwrap();
    assert_eq!(a.lei, b.lei);
}

#[test]
fn unknown_isin_is_a_definitive_miss() {
    let store = seeded_store();
    let err = store.get_by_isin(&isin("ZZ0000000000")).unwrap_err();
    assert!(matches!(err, MatchError::CompanyNotFound { .. }));
}

#[test]
fn unknown_lei_is_a_definitive_miss() {
    let store = seeded_store();
    let err = store.get_by_lei("LEI00000000000000099").unwrap_err();
    assert!(matches!(err, MatchError::CompanyNotFound { .. }));
}

#[test]
fn mapping_without_entity_row_is_a_miss() {
    let store = seeded_store();
    store.map_isin(&isin("DE0000000004"), "LEI00000000000000099").unwrap();
    let err = store.get_by_isin(&isin("DE0000000004")).unwrap_err();
    assert!(matches!(err, MatchError::CompanyNotFound { .. }));
}

#[test]
fn batched_lookup_omits_misses() {
    let store = seeded_store();
    let found = store
        .get_by_isins(&[
            isin("CH0000000001"),
            isin("ZZ0000000000"),
            isin("CH0000000002"),
        ])
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|(i, _)| i.as_str() != "ZZ0000000000"));
}

#[test]
fn batched_lookup_of_nothing_is_empty() {
    let store = seeded_store();
    assert!(store.get_by_isins(&[]).unwrap().is_empty());
}

#[test]
fn enrich_company_persists_and_is_idempotent() {
    let store = seeded_store();
    let labels = vec!["Banking".to_string(), "Insurance".to_string()];

    store.enrich_company("LEI00000000000000001", "global bank", &labels).unwrap();
    store.enrich_company("LEI00000000000000001", "global bank", &labels).unwrap();

    let found = store.get_by_lei("LEI00000000000000001").unwrap();
    assert_eq!(found.description.as_deref(), Some("global bank"));
    assert_eq!(found.sector_labels, labels);
    assert_eq!(found.enrichment_state, EnrichmentState::Enriched);
    assert!(found.enriched_at.is_some());
    assert!(found.has_sector_data());
}

#[test]
fn enrich_unknown_lei_fails() {
    let store = seeded_store();
    let err = store
        .enrich_company("LEI00000000000000099", "ghost", &[])
        .unwrap_err();
    assert!(matches!(err, MatchError::CompanyNotFound { .. }));
}

#[test]
fn mark_attempted_records_tried_empty() {
    let store = seeded_store();
    store.mark_enrichment_attempted("LEI00000000000000002").unwrap();

    let found = store.get_by_lei("LEI00000000000000002").unwrap();
    assert_eq!(found.enrichment_state, EnrichmentState::TriedEmpty);
    assert!(!found.needs_enrichment());
    assert!(!found.has_sector_data());
}

#[test]
fn mark_attempted_never_downgrades_enriched() {
    let store = seeded_store();
    store
        .enrich_company("LEI00000000000000001", "global bank", &["Banking".to_string()])
        .unwrap();
    store.mark_enrichment_attempted("LEI00000000000000001").unwrap();

    let found = store.get_by_lei("LEI00000000000000001").unwrap();
    assert_eq!(found.enrichment_state, EnrichmentState::Enriched);
    assert_eq!(found.sector_labels, vec!["Banking"]);
}

#[test]
fn list_all_respects_limit() {
    let store = seeded_store();
    assert_eq!(store.list_all(1).unwrap().len(), 1);
    assert_eq!(store.list_all(10).unwrap().len(), 2);
}

#[test]
fn insert_company_ignores_existing_rows() {
    let store = seeded_store();
    let mut altered = company("LEI00000000000000001", "Renamed AG");
    altered.city = "Geneva".to_string();
    store.insert_company(&altered).unwrap();

    let found = store.get_by_lei("LEI00000000000000001").unwrap();
    assert_eq!(found.legal_name, "Alpha AG");
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.db");

    {
        let store = StorageEngine::open(&path).unwrap();
        store.insert_company(&company("LEI00000000000000001", "Alpha AG")).unwrap();
        store.map_isin(&isin("CH0000000001"), "LEI00000000000000001").unwrap();
        store
            .enrich_company("LEI00000000000000001", "global bank", &["Banking".to_string()])
            .unwrap();
    }

    let store = StorageEngine::open(&path).unwrap();
    let found = store.get_by_isin(&isin("CH0000000001")).unwrap();
    assert_eq!(found.enrichment_state, EnrichmentState::Enriched);
    assert_eq!(found.sector_labels, vec!["Banking"]);
}

#[test]
fn probe_reports_existence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.db");
    assert!(!StorageEngine::probe(&path));
    let _store = StorageEngine::open(&path).unwrap();
    assert!(StorageEngine::probe(&path));
}
