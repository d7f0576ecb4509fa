/// Peermatch system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of a canonical ISIN.
pub const ISIN_LENGTH: usize = 12;

/// LEIs per batched knowledge-base request.
pub const DEFAULT_ENRICHMENT_BATCH_SIZE: usize = 30;

/// Attempts per knowledge-base call before degrading to an empty result.
pub const ENRICHMENT_MAX_ATTEMPTS: u32 = 3;

/// Base backoff delay in seconds; doubles between attempts.
pub const ENRICHMENT_BACKOFF_BASE_SECS: f64 = 1.0;

/// Timeout for a single-LEI knowledge-base query.
pub const SINGLE_QUERY_TIMEOUT_SECS: u64 = 15;

/// Timeout for a batched knowledge-base query.
pub const BATCH_QUERY_TIMEOUT_SECS: u64 = 60;

/// Name of the vector index collection holding company embeddings.
pub const DEFAULT_COLLECTION: &str = "companies";

/// Embedding model identifier recorded in the collection metadata.
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

/// Distance metric recorded in the collection metadata.
pub const DEFAULT_DISTANCE: &str = "cosine";
