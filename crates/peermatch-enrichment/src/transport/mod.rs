//! HTTP transport with retry and exponential backoff.

pub mod sparql;

use std::thread;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::warn;

use peermatch_core::config::EnrichmentConfig;
use peermatch_core::constants::VERSION;
use peermatch_core::errors::EnrichmentError;

/// Statuses worth retrying: rate limiting and transient server failures.
const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Long-lived HTTP client for the knowledge base.
///
/// Constructed once per engine instance so the connection pool is reused
/// across calls; lifetime stays scoped to the owner.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: EnrichmentConfig,
}

impl HttpTransport {
    pub fn new(config: EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/sparql-results+json"),
        );

        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("peermatch/{VERSION} (analyst tooling)"))
            .default_headers(headers)
            .build()
            .map_err(|e| EnrichmentError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// GET the SPARQL endpoint with the given query.
    ///
    /// Retryable statuses and transport failures are retried with
    /// exponential backoff; any other failure returns immediately.
    /// Callers degrade every error to an empty result.
    pub fn get(&self, query: &str, timeout: Duration) -> Result<String, EnrichmentError> {
        let mut delay = Duration::from_secs_f64(self.config.backoff_base_secs);
        let mut last_reason = String::new();

        for attempt in 1..=self.config.max_attempts {
            match self
                .client
                .get(&self.config.endpoint)
                .query(&[("query", query)])
                .timeout(timeout)
                .send()
            {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if response.status().is_success() {
                        return response.text().map_err(|e| EnrichmentError::RequestFailed {
                            reason: e.to_string(),
                        });
                    }
                    if !RETRYABLE_STATUSES.contains(&status) {
                        return Err(EnrichmentError::RequestFailed {
                            reason: format!("status {status}"),
                        });
                    }
                    warn!(status, attempt, "retryable status from knowledge base");
                    last_reason = format!("status {status}");
                }
                Err(e) => {
                    warn!(error = %e, attempt, "knowledge-base transport failure");
                    last_reason = e.to_string();
                }
            }

            if attempt < self.config.max_attempts {
                thread::sleep(delay);
                delay *= 2;
            }
        }

        Err(EnrichmentError::RetriesExhausted {
            attempts: self.config.max_attempts,
            reason: last_reason,
        })
    }
}
