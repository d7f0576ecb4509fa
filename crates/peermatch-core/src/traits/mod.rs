//! Capability contracts at the seams of the pipeline.
//!
//! Each external collaborator (relational store, knowledge base, vector
//! index) is specified as a trait with one production adapter, so any
//! backend implementing the same contract can be swapped in.

mod enrichment;
mod index;
mod store;

pub use enrichment::IEnrichmentSource;
pub use index::IVectorIndex;
pub use store::ICompanyStore;
