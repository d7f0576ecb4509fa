use std::collections::HashMap;

use crate::models::EnrichmentResult;

/// Contract for the external knowledge base, keyed by LEI.
///
/// Implementations never fail: "no data found" and "request failed" both
/// yield empty results, keeping enrichment an optional signal.
pub trait IEnrichmentSource: Send + Sync {
    /// Look up one LEI.
    fn query_single(&self, lei: &str) -> EnrichmentResult;

    /// Look up many LEIs. Every requested LEI is present in the output map,
    /// filled with an empty result when the knowledge base had nothing.
    fn query_batch(&self, leis: &[String]) -> HashMap<String, EnrichmentResult>;
}
