use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Knowledge-base client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// SPARQL endpoint URL.
    pub endpoint: String,
    /// LEIs per batched request.
    pub batch_size: usize,
    /// Attempts per call before degrading to an empty result.
    pub max_attempts: u32,
    /// Base backoff delay in seconds; doubles between attempts.
    pub backoff_base_secs: f64,
    /// Timeout for single-LEI queries, in seconds.
    pub single_timeout_secs: u64,
    /// Timeout for batched queries, in seconds.
    pub batch_timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_SPARQL_ENDPOINT.to_string(),
            batch_size: constants::DEFAULT_ENRICHMENT_BATCH_SIZE,
            max_attempts: constants::ENRICHMENT_MAX_ATTEMPTS,
            backoff_base_secs: constants::ENRICHMENT_BACKOFF_BASE_SECS,
            single_timeout_secs: constants::SINGLE_QUERY_TIMEOUT_SECS,
            batch_timeout_secs: constants::BATCH_QUERY_TIMEOUT_SECS,
        }
    }
}
