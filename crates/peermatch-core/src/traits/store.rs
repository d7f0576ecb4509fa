use crate::errors::MatchResult;
use crate::identifier::Isin;
use crate::models::Company;

/// Lookup + enrichment-write contract for the relational identity store.
pub trait ICompanyStore: Send + Sync {
    // --- Lookup ---

    /// Resolve an ISIN to its issuing entity via the identifier mapping.
    fn get_by_isin(&self, isin: &Isin) -> MatchResult<Company>;

    /// Batched variant. ISINs with no match are simply absent from the
    /// result; each pair carries the matched ISIN so callers can restore
    /// input order.
    fn get_by_isins(&self, isins: &[Isin]) -> MatchResult<Vec<(Isin, Company)>>;

    /// Direct lookup by LEI.
    fn get_by_lei(&self, lei: &str) -> MatchResult<Company>;

    // --- Enrichment writes ---

    /// Idempotent upsert of the enrichment fields plus a write timestamp.
    /// Moves the lifecycle state to `enriched`; commits before returning.
    fn enrich_company(&self, lei: &str, description: &str, labels: &[String]) -> MatchResult<()>;

    /// Record that the knowledge base was queried and had no match, so the
    /// LEI is not re-queried. Never downgrades an enriched row.
    fn mark_enrichment_attempted(&self, lei: &str) -> MatchResult<()>;

    // --- Reference load / administrative ---

    /// Insert a reference row. Existing rows are left untouched.
    fn insert_company(&self, company: &Company) -> MatchResult<()>;

    /// Map an ISIN to a LEI (n:1). Existing mappings are left untouched.
    fn map_isin(&self, isin: &Isin, lei: &str) -> MatchResult<()>;

    /// Bounded scan, administrative use only.
    fn list_all(&self, limit: usize) -> MatchResult<Vec<Company>>;
}
