//! Domain models: the company identity record and knowledge-base results.

pub mod company;
pub mod enrichment;

pub use company::{Company, EnrichmentState};
pub use enrichment::{EnrichmentResult, SectorFact};
