//! Runtime configuration, loadable from TOML with environment overrides.

pub mod defaults;
mod enrichment_config;
mod index_config;

pub use enrichment_config::EnrichmentConfig;
pub use index_config::IndexConfig;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{MatchError, MatchResult};

/// Top-level configuration for the matching pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Path to the SQLite identity database.
    pub db_path: PathBuf,
    pub enrichment: EnrichmentConfig,
    pub index: IndexConfig,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(defaults::DEFAULT_DB_PATH),
            enrichment: EnrichmentConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl MatcherConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> MatchResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| MatchError::ConfigError {
            reason: format!("read {}: {e}", path.display()),
        })?;
        toml::from_str(&text).map_err(|e| MatchError::ConfigError {
            reason: format!("parse {}: {e}", path.display()),
        })
    }

    /// Resolve the effective configuration: the explicit file if given,
    /// otherwise defaults, then environment overrides on top.
    pub fn load(explicit: Option<&Path>) -> MatchResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `PEERMATCH_DB_PATH` and `PEERMATCH_INDEX_URL` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("PEERMATCH_DB_PATH") {
            self.db_path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("PEERMATCH_INDEX_URL") {
            self.index.base_url = url;
        }
    }
}
