use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an entity stands in the one-way enrichment lifecycle.
///
/// Transitions only move forward: `NotTried` → `TriedEmpty` or `Enriched`.
/// A `TriedEmpty` or `Enriched` entity is never queried again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentState {
    /// Never queried against the knowledge base.
    #[default]
    NotTried,
    /// Queried; the knowledge base had no match.
    TriedEmpty,
    /// A positive hit was applied and persisted.
    Enriched,
}

impl EnrichmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotTried => "not_tried",
            Self::TriedEmpty => "tried_empty",
            Self::Enriched => "enriched",
        }
    }

    /// Parse the stored form. Unknown values map to `None` so callers can
    /// decide how to treat rows written by newer versions.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not_tried" => Some(Self::NotTried),
            "tried_empty" => Some(Self::TriedEmpty),
            "enriched" => Some(Self::Enriched),
            _ => None,
        }
    }
}

/// Identity record for a legal entity, keyed by LEI.
///
/// The reference attributes come from the bulk load and are immutable here;
/// `description` and `sector_labels` are lazily populated from the
/// knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub lei: String,
    pub registration_status: String,
    pub entity_status: String,
    pub legal_name: String,
    pub city: String,
    pub country: String,
    pub category: String,
    /// Free-text description from the knowledge base.
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered sector labels from the knowledge base.
    #[serde(default)]
    pub sector_labels: Vec<String>,
    /// One-way enrichment lifecycle state.
    #[serde(default)]
    pub enrichment_state: EnrichmentState,
    /// When the enrichment fields were last written.
    #[serde(default)]
    pub enriched_at: Option<DateTime<Utc>>,
}

impl Company {
    /// True iff any enrichment data is present.
    ///
    /// Monotonic: once `enrich` has run with real data this stays true for
    /// the lifetime of the record.
    pub fn has_sector_data(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
            || !self.sector_labels.is_empty()
    }

    /// Whether this entity is still eligible for an external lookup.
    ///
    /// `TriedEmpty` entities are not re-queried: a negative answer is
    /// cached just like a positive one.
    pub fn needs_enrichment(&self) -> bool {
        !self.has_sector_data() && self.enrichment_state == EnrichmentState::NotTried
    }

    /// Apply enrichment facts in memory. One-way: moves the state to
    /// `Enriched` and never clears previously set data.
    pub fn enrich(&mut self, labels: Vec<String>, description: String) {
        self.description = Some(description);
        self.sector_labels = labels;
        self.enrichment_state = EnrichmentState::Enriched;
        self.enriched_at = Some(Utc::now());
    }

    /// The deterministic text fed to the similarity index.
    ///
    /// Recomputed on every index write, never stored. Exactly one of the
    /// four templates applies for any combination of description and
    /// sector-label presence.
    pub fn embedding_text(&self) -> String {
        let description = self.description.as_deref().filter(|d| !d.is_empty());
        let labels = self.sector_labels.join(", ");

        match (description, !self.sector_labels.is_empty()) {
            (Some(desc), true) => format!(
                "{} is a {}, located in {}, {}. It belongs in {}.",
                self.legal_name, desc, self.city, self.country, labels
            ),
            (Some(desc), false) => format!(
                "{} is a {}, located in {}, {}.",
                self.legal_name, desc, self.city, self.country
            ),
            (None, true) => format!(
                "Company {}, located in {}, {}. It belongs in {}.",
                self.legal_name, self.city, self.country, labels
            ),
            (None, false) => format!(
                "Risk characteristics for company {}. Located in {}, {}. Category: {}.",
                self.legal_name, self.city, self.country, self.category
            ),
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, LEI: {}, Country: {}, Category: {}",
            self.legal_name, self.lei, self.country, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_company() -> Company {
        Company {
            lei: "529900T8BM49AURSDO55".to_string(),
            registration_status: "ISSUED".to_string(),
            entity_status: "ACTIVE".to_string(),
            legal_name: "Test Co".to_string(),
            city: "Zurich".to_string(),
            country: "CH".to_string(),
            category: "GENERAL".to_string(),
            description: None,
            sector_labels: Vec::new(),
            enrichment_state: EnrichmentState::NotTried,
            enriched_at: None,
        }
    }

    #[test]
    fn has_sector_data_is_false_initially() {
        assert!(!test_company().has_sector_data());
        assert!(test_company().needs_enrichment());
    }

    #[test]
    fn enrich_updates_state() {
        let mut company = test_company();
        company.enrich(vec!["Banking".to_string()], "Global Bank".to_string());

        assert!(company.has_sector_data());
        assert!(!company.needs_enrichment());
        assert_eq!(company.enrichment_state, EnrichmentState::Enriched);
        assert_eq!(company.sector_labels, vec!["Banking"]);
        assert_eq!(company.description.as_deref(), Some("Global Bank"));
        assert!(company.enriched_at.is_some());
    }

    #[test]
    fn tried_empty_is_not_requeried() {
        let mut company = test_company();
        company.enrichment_state = EnrichmentState::TriedEmpty;
        assert!(!company.has_sector_data());
        assert!(!company.needs_enrichment());
    }

    #[test]
    fn embedding_text_with_description_and_sectors() {
        let mut company = test_company();
        company.enrich(
            vec!["Electronics".to_string(), "Software".to_string()],
            "technology company".to_string(),
        );
        assert_eq!(
            company.embedding_text(),
            "Test Co is a technology company, located in Zurich, CH. \
             It belongs in Electronics, Software."
        );
    }

    #[test]
    fn embedding_text_with_description_only() {
        let mut company = test_company();
        company.enrich(Vec::new(), "technology company".to_string());
        assert_eq!(
            company.embedding_text(),
            "Test Co is a technology company, located in Zurich, CH."
        );
    }

    #[test]
    fn embedding_text_with_sectors_only() {
        let mut company = test_company();
        company.enrich(vec!["Electronics".to_string()], String::new());
        assert_eq!(
            company.embedding_text(),
            "Company Test Co, located in Zurich, CH. It belongs in Electronics."
        );
    }

    #[test]
    fn embedding_text_fallback() {
        let text = test_company().embedding_text();
        assert!(text.starts_with("Risk characteristics"));
        assert!(text.contains("GENERAL"));
    }

    #[test]
    fn embedding_text_is_deterministic() {
        let company = test_company();
        assert_eq!(company.embedding_text(), company.embedding_text());
    }

    #[test]
    fn display_includes_identity() {
        let shown = test_company().to_string();
        assert!(shown.contains("Test Co"));
        assert!(shown.contains("529900T8BM49AURSDO55"));
    }

    #[test]
    fn enrichment_state_round_trips_storage_form() {
        for state in [
            EnrichmentState::NotTried,
            EnrichmentState::TriedEmpty,
            EnrichmentState::Enriched,
        ] {
            assert_eq!(EnrichmentState::parse(state.as_str()), Some(state));
        }
        assert_eq!(EnrichmentState::parse("bogus"), None);
    }
}
