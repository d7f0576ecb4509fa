use crate::errors::MatchResult;

/// Upsert/query contract for the external vector similarity index.
///
/// The index owns the text→vector function; this core only hands it
/// documents and ids.
pub trait IVectorIndex: Send + Sync {
    /// Insert or replace (id, document) pairs. Idempotent: repeating an
    /// upsert with unchanged text replaces the vector with an identical one.
    fn upsert(&self, items: &[(String, String)]) -> MatchResult<()>;

    /// Up to `k` nearest neighbors for the query text: ids plus distances,
    /// in index-defined order. May return fewer than `k` without error.
    fn query(&self, text: &str, k: usize) -> MatchResult<(Vec<String>, Vec<f32>)>;

    /// Number of stored documents.
    fn count(&self) -> MatchResult<usize>;
}
