//! MatchingEngine — normalize → resolve + enrich → index → hydrate.

use tracing::{debug, info};

use peermatch_core::errors::{MatchError, MatchResult};
use peermatch_core::models::Company;
use peermatch_core::traits::IVectorIndex;
use peermatch_core::Isin;
use peermatch_enrichment::EnrichmentEngine;

/// Neighbors plus their index-reported distances.
///
/// Ordering is whatever the index returned; it is never re-sorted here.
#[derive(Debug)]
pub struct MatchSet {
    pub companies: Vec<Company>,
    pub distances: Vec<f32>,
}

/// The top-level matching façade.
pub struct MatchingEngine<'a> {
    enrichment: &'a EnrichmentEngine<'a>,
    index: &'a dyn IVectorIndex,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(enrichment: &'a EnrichmentEngine<'a>, index: &'a dyn IVectorIndex) -> Self {
        Self { enrichment, index }
    }

    /// Resolve a raw identifier to its (enriched) issuing entity.
    pub fn resolve(&self, raw: &str) -> MatchResult<Company> {
        let isin = Isin::parse(raw)?;
        self.enrichment.get_enriched_by_isin(&isin)
    }

    /// Nearest peers for an instrument's issuer.
    ///
    /// Queries the index with the source entity's embedding text, then
    /// hydrates each returned LEI back into a full entity. An id the
    /// identity store no longer knows is a cross-store integrity problem
    /// and surfaces as `IndexInconsistency`.
    pub fn find_matches(&self, raw: &str, k: usize) -> MatchResult<MatchSet> {
        let source = self.resolve(raw)?;
        let (leis, distances) = self.index.query(&source.embedding_text(), k)?;
        debug!(matches = leis.len(), k, "similarity query returned");

        let mut companies = Vec::with_capacity(leis.len());
        for lei in &leis {
            let company = self.enrichment.get_enriched(lei).map_err(|e| match e {
                MatchError::CompanyNotFound { .. } => {
                    MatchError::IndexInconsistency { lei: lei.clone() }
                }
                other => other,
            })?;
            companies.push(company);
        }

        Ok(MatchSet {
            companies,
            distances,
        })
    }

    /// Normalize, resolve + enrich, and upsert the given identifiers into
    /// the index, keyed by LEI. Returns the number of entities upserted.
    ///
    /// Idempotent: re-running for an unchanged entity recomputes the same
    /// embedding text and replaces the vector with an identical one.
    pub fn insert_embeddings(&self, raws: &[&str]) -> MatchResult<usize> {
        let isins = raws
            .iter()
            .map(|raw| Isin::parse(raw))
            .collect::<MatchResult<Vec<_>>>()?;

        let companies = self.enrichment.get_enriched_many(&isins)?;

        let mut items = Vec::with_capacity(isins.len());
        for (isin, slot) in isins.iter().zip(&companies) {
            match slot {
                Some(company) => items.push((company.lei.clone(), company.embedding_text())),
                None => {
                    return Err(MatchError::CompanyNotFound {
                        key: isin.as_str().to_string(),
                    })
                }
            }
        }

        self.index.upsert(&items)?;
        info!(inserted = items.len(), "upserted embeddings");
        Ok(items.len())
    }
}
