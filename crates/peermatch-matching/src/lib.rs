//! # peermatch-matching
//!
//! The top-level façade over the pipeline: normalizes identifiers,
//! obtains enriched entities, drives embedding insertion and similarity
//! retrieval, and hydrates result sets.

pub mod engine;

pub use engine::{MatchSet, MatchingEngine};
