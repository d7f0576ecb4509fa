/// Knowledge-base client errors.
///
/// Internal to the enrichment crate: the client recovers from all of these
/// by degrading to an empty result, so callers never observe them.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("retries exhausted after {attempts} attempts: {reason}")]
    RetriesExhausted { attempts: u32, reason: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}
