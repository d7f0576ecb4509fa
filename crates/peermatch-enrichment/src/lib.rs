//! # peermatch-enrichment
//!
//! Wikidata SPARQL client with retry/backoff and graceful degradation,
//! plus the [`EnrichmentEngine`] orchestrator that decides when to call
//! the knowledge base and persists the outcome.

pub mod client;
pub mod engine;
pub mod transport;

pub use client::WikidataClient;
pub use engine::EnrichmentEngine;
