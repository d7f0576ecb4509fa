//! WikidataClient — the production `IEnrichmentSource` adapter.

use std::collections::HashMap;
use std::time::Duration;

use tracing::warn;

use peermatch_core::config::EnrichmentConfig;
use peermatch_core::errors::MatchResult;
use peermatch_core::models::EnrichmentResult;
use peermatch_core::traits::IEnrichmentSource;

use crate::transport::sparql::{self, SparqlResponse};
use crate::transport::HttpTransport;

/// Queries the knowledge base by LEI.
///
/// Never fails: transport errors, exhausted retries, and malformed
/// payloads all degrade to empty results, so enrichment stays an
/// optional signal for callers.
pub struct WikidataClient {
    transport: HttpTransport,
    config: EnrichmentConfig,
}

impl WikidataClient {
    pub fn new(config: EnrichmentConfig) -> MatchResult<Self> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self { transport, config })
    }

    /// Fetch and parse one query, degrading every failure to `None`.
    fn fetch(&self, query: &str, timeout: Duration) -> Option<SparqlResponse> {
        let body = match self.transport.get(query, timeout) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "knowledge-base request failed, degrading to empty result");
                return None;
            }
        };
        match sparql::parse_response(&body) {
            Ok(response) => Some(response),
            Err(e) => {
                warn!(error = %e, "discarding malformed knowledge-base response");
                None
            }
        }
    }
}

impl IEnrichmentSource for WikidataClient {
    fn query_single(&self, lei: &str) -> EnrichmentResult {
        let query = sparql::single_query(lei);
        let timeout = Duration::from_secs(self.config.single_timeout_secs);
        match self.fetch(&query, timeout) {
            Some(response) => sparql::collect_single(&response),
            None => EnrichmentResult::empty(),
        }
    }

    fn query_batch(&self, leis: &[String]) -> HashMap<String, EnrichmentResult> {
        let timeout = Duration::from_secs(self.config.batch_timeout_secs);
        let chunk_size = self.config.batch_size.max(1);

        let mut results = HashMap::with_capacity(leis.len());
        for chunk in leis.chunks(chunk_size) {
            let query = sparql::batch_query(chunk);
            let chunk_results = match self.fetch(&query, timeout) {
                Some(response) => sparql::collect_batch(&response, chunk),
                None => chunk
                    .iter()
                    .map(|lei| (lei.clone(), EnrichmentResult::empty()))
                    .collect(),
            };
            results.extend(chunk_results);
        }
        results
    }
}
