use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Vector index service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Base URL of the index service.
    pub base_url: String,
    /// Logical collection holding company embeddings.
    pub collection: String,
    /// Embedding model identifier recorded in the collection metadata.
    pub embedding_model: String,
    /// Distance metric recorded in the collection metadata.
    pub distance: String,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_INDEX_URL.to_string(),
            collection: constants::DEFAULT_COLLECTION.to_string(),
            embedding_model: constants::DEFAULT_EMBEDDING_MODEL.to_string(),
            distance: constants::DEFAULT_DISTANCE.to_string(),
            timeout_secs: defaults::DEFAULT_INDEX_TIMEOUT_SECS,
        }
    }
}
