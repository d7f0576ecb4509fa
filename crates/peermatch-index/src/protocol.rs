//! Wire types for the Chroma-style vector index service.

use serde::{Deserialize, Serialize};

/// Collection descriptor returned by create/get.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metadata: Option<CollectionMetadata>,
}

/// Index metadata recorded on the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    /// Identifier of the text→vector model the service applies.
    #[serde(default)]
    pub embedding_model: Option<String>,
    /// Distance metric for the underlying HNSW index.
    #[serde(rename = "hnsw:space", default)]
    pub distance: Option<String>,
}

/// Get-or-create payload.
#[derive(Debug, Serialize)]
pub struct CreateCollectionRequest<'a> {
    pub name: &'a str,
    pub metadata: CollectionMetadata,
    pub get_or_create: bool,
}

/// Upsert payload: parallel ids/documents arrays.
#[derive(Debug, Serialize)]
pub struct UpsertRequest<'a> {
    pub ids: Vec<&'a str>,
    pub documents: Vec<&'a str>,
}

/// Query payload; the service embeds `query_texts` itself.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub query_texts: Vec<&'a str>,
    pub n_results: usize,
    pub include: Vec<&'a str>,
}

/// Query response: one inner list per query text.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub ids: Vec<Vec<String>>,
    #[serde(default)]
    pub distances: Option<Vec<Vec<f32>>>,
}
