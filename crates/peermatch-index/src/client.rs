//! HttpVectorIndex — the production `IVectorIndex` adapter.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use peermatch_core::config::IndexConfig;
use peermatch_core::errors::{IndexError, MatchResult};
use peermatch_core::traits::IVectorIndex;

use crate::protocol::{
    Collection, CollectionMetadata, CreateCollectionRequest, QueryRequest, QueryResponse,
    UpsertRequest,
};

/// Talks to a Chroma-style REST service holding one logical collection of
/// company embedding texts, keyed by LEI.
pub struct HttpVectorIndex {
    client: reqwest::blocking::Client,
    config: IndexConfig,
    collection_id: String,
}

impl HttpVectorIndex {
    /// Attach to the configured collection, creating it if missing.
    ///
    /// A stored embedding-model identifier differing from the configured
    /// one is a hard error: mixing models in one collection silently
    /// breaks every distance comparison.
    pub fn connect(config: IndexConfig) -> MatchResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IndexError::RequestFailed {
                reason: e.to_string(),
            })?;

        let request = CreateCollectionRequest {
            name: &config.collection,
            metadata: CollectionMetadata {
                embedding_model: Some(config.embedding_model.clone()),
                distance: Some(config.distance.clone()),
            },
            get_or_create: true,
        };
        let url = format!("{}/api/v1/collections", base(&config));
        let collection: Collection = post_json(&client, &url, &request)?;

        if let Some(stored) = collection
            .metadata
            .as_ref()
            .and_then(|m| m.embedding_model.as_deref())
        {
            if stored != config.embedding_model {
                return Err(IndexError::ModelMismatch {
                    configured: config.embedding_model.clone(),
                    stored: stored.to_string(),
                }
                .into());
            }
        }

        info!(collection = %collection.name, "attached to vector index");
        Ok(Self {
            client,
            config,
            collection_id: collection.id,
        })
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{suffix}",
            base(&self.config),
            self.collection_id
        )
    }
}

fn base(config: &IndexConfig) -> &str {
    config.base_url.trim_end_matches('/')
}

/// POST a JSON body and decode a JSON response, mapping failures onto the
/// index error taxonomy.
fn post_json<B: Serialize, R: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: &str,
    body: &B,
) -> MatchResult<R> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .map_err(|e| IndexError::RequestFailed {
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(IndexError::BadStatus {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    response.json().map_err(|e| {
        IndexError::MalformedResponse {
            reason: e.to_string(),
        }
        .into()
    })
}

impl IVectorIndex for HttpVectorIndex {
    fn upsert(&self, items: &[(String, String)]) -> MatchResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        let request = UpsertRequest {
            ids: items.iter().map(|(id, _)| id.as_str()).collect(),
            documents: items.iter().map(|(_, doc)| doc.as_str()).collect(),
        };
        let _: serde_json::Value =
            post_json(&self.client, &self.collection_url("upsert"), &request)?;
        debug!(count = items.len(), "upserted documents");
        Ok(())
    }

    fn query(&self, text: &str, k: usize) -> MatchResult<(Vec<String>, Vec<f32>)> {
        let request = QueryRequest {
            query_texts: vec![text],
            n_results: k,
            include: vec!["distances"],
        };
        let response: QueryResponse =
            post_json(&self.client, &self.collection_url("query"), &request)?;

        let ids = response.ids.into_iter().next().unwrap_or_default();
        let distances = response
            .distances
            .unwrap_or_default()
            .into_iter()
            .next()
            .unwrap_or_default();
        Ok((ids, distances))
    }

    fn count(&self) -> MatchResult<usize> {
        let response = self
            .client
            .get(self.collection_url("count"))
            .send()
            .map_err(|e| IndexError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(IndexError::BadStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response.text().map_err(|e| IndexError::RequestFailed {
            reason: e.to_string(),
        })?;
        body.trim().parse().map_err(|_| {
            IndexError::MalformedResponse {
                reason: format!("expected an integer count, got '{body}'"),
            }
            .into()
        })
    }
}
