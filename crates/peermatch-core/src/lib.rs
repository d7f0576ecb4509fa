//! # peermatch-core
//!
//! Foundation crate for the peermatch identity-resolution pipeline.
//! Defines the entity model, capability traits, errors, config, and
//! identifier normalization. Every other crate in the workspace depends
//! on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod identifier;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MatcherConfig;
pub use errors::{MatchError, MatchResult};
pub use identifier::Isin;
pub use models::{Company, EnrichmentResult, EnrichmentState, SectorFact};
