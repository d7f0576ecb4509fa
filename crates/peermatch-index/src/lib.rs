//! # peermatch-index
//!
//! HTTP adapter for the external vector similarity service. The service
//! owns the text→vector function and the index internals; this crate only
//! drives the upsert/query surface defined by `IVectorIndex`.

pub mod client;
pub mod protocol;

pub use client::HttpVectorIndex;
