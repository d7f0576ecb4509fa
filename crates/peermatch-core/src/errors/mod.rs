//! Error taxonomy for the matching pipeline.
//!
//! Validation and not-found conditions surface to the caller; knowledge-base
//! failures stay inside the enrichment crate and degrade to empty results.

mod enrichment_error;
mod index_error;
mod storage_error;

pub use enrichment_error::EnrichmentError;
pub use index_error::IndexError;
pub use storage_error::StorageError;

/// Aggregate error for every caller-visible failure in the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },

    #[error("no company record for {key}")]
    CompanyNotFound { key: String },

    #[error("similarity index returned {lei}, but the identity store has no such record")]
    IndexInconsistency { lei: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    EnrichmentError(#[from] EnrichmentError),

    #[error(transparent)]
    IndexError(#[from] IndexError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type MatchResult<T> = Result<T, MatchError>;
