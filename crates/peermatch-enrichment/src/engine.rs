//! EnrichmentEngine — decides whether an entity needs enrichment, invokes
//! the knowledge-base client, persists the outcome through the identity
//! store, and returns fully hydrated entities.

use std::collections::HashMap;

use tracing::{debug, info};

use peermatch_core::errors::MatchResult;
use peermatch_core::models::{Company, EnrichmentResult, EnrichmentState};
use peermatch_core::traits::{ICompanyStore, IEnrichmentSource};
use peermatch_core::Isin;

/// Orchestrates the one-way enrichment lifecycle.
///
/// Owns the knowledge-base source for its lifetime so the underlying
/// transport is reused across calls.
pub struct EnrichmentEngine<'a> {
    store: &'a dyn ICompanyStore,
    source: Box<dyn IEnrichmentSource>,
}

impl<'a> EnrichmentEngine<'a> {
    pub fn new(store: &'a dyn ICompanyStore, source: Box<dyn IEnrichmentSource>) -> Self {
        Self { store, source }
    }

    /// Resolve an ISIN and return its entity, enriched if possible.
    pub fn get_enriched_by_isin(&self, isin: &Isin) -> MatchResult<Company> {
        let company = self.store.get_by_isin(isin)?;
        self.ensure_enriched(company)
    }

    /// Look up a LEI and return its entity, enriched if possible.
    pub fn get_enriched(&self, lei: &str) -> MatchResult<Company> {
        let company = self.store.get_by_lei(lei)?;
        self.ensure_enriched(company)
    }

    /// Batched variant: one store call, one batched knowledge-base call
    /// across every entity that still needs enrichment. The returned list
    /// preserves the input ordering, with `None` at positions whose ISIN
    /// resolved to nothing.
    pub fn get_enriched_many(&self, isins: &[Isin]) -> MatchResult<Vec<Option<Company>>> {
        let found = self.store.get_by_isins(isins)?;
        let by_isin: HashMap<String, Company> = found
            .into_iter()
            .map(|(isin, company)| (isin.as_str().to_string(), company))
            .collect();

        let mut slots: Vec<Option<Company>> = isins
            .iter()
            .map(|isin| by_isin.get(isin.as_str()).cloned())
            .collect();

        let pending: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(Company::needs_enrichment))
            .map(|(idx, _)| idx)
            .collect();
        if pending.is_empty() {
            return Ok(slots);
        }

        let leis: Vec<String> = pending
            .iter()
            .filter_map(|&idx| slots[idx].as_ref().map(|c| c.lei.clone()))
            .collect();
        info!(total = isins.len(), pending = leis.len(), "running batch enrichment");

        let results = self.source.query_batch(&leis);
        for idx in pending {
            if let Some(company) = slots[idx].as_mut() {
                // Two instruments of the same issuer share one lookup; the
                // duplicate persist is idempotent.
                let result = results
                    .get(&company.lei)
                    .cloned()
                    .unwrap_or_else(EnrichmentResult::empty);
                self.apply(company, result)?;
            }
        }
        Ok(slots)
    }

    /// Enrich when the entity is still eligible; otherwise hand it back
    /// untouched with no external call.
    fn ensure_enriched(&self, mut company: Company) -> MatchResult<Company> {
        if !company.needs_enrichment() {
            return Ok(company);
        }
        let result = self.source.query_single(&company.lei);
        self.apply(&mut company, result)?;
        Ok(company)
    }

    /// Apply one lookup outcome: a positive hit is enriched in memory and
    /// persisted; a miss records the attempt so the LEI is not re-queried.
    fn apply(&self, company: &mut Company, result: EnrichmentResult) -> MatchResult<()> {
        if result.is_empty() {
            self.store.mark_enrichment_attempted(&company.lei)?;
            company.enrichment_state = EnrichmentState::TriedEmpty;
            debug!(lei = %company.lei, "knowledge base had no match");
            return Ok(());
        }

        let description = result.description.clone().unwrap_or_default();
        let labels = result.labels();
        company.enrich(labels.clone(), description.clone());
        self.store.enrich_company(&company.lei, &description, &labels)?;
        debug!(lei = %company.lei, sectors = labels.len(), "enriched company");
        Ok(())
    }
}
