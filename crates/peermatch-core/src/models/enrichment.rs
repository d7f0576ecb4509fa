use serde::{Deserialize, Serialize};

/// A sector/industry fact for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorFact {
    pub label: String,
    /// Knowledge-base item id for the sector, when the response carried one.
    #[serde(default)]
    pub qid: Option<String>,
}

/// Outcome of a knowledge-base lookup for one LEI.
///
/// An empty result stands for both "no data found" and "request failed";
/// callers treat the two identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub wikidata_id: Option<String>,
    pub description: Option<String>,
    pub sectors: Vec<SectorFact>,
}

impl EnrichmentResult {
    /// The degraded "no data / request failed" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the lookup produced no usable match.
    pub fn is_empty(&self) -> bool {
        self.wikidata_id.is_none()
    }

    /// Sector labels in response order.
    pub fn labels(&self) -> Vec<String> {
        self.sectors.iter().map(|s| s.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_match() {
        assert!(EnrichmentResult::empty().is_empty());
    }

    #[test]
    fn result_with_id_is_a_match() {
        let result = EnrichmentResult {
            wikidata_id: Some("Q312".to_string()),
            description: None,
            sectors: Vec::new(),
        };
        assert!(!result.is_empty());
    }

    #[test]
    fn labels_preserve_order() {
        let result = EnrichmentResult {
            wikidata_id: Some("Q312".to_string()),
            description: None,
            sectors: vec![
                SectorFact { label: "Electronics".to_string(), qid: Some("Q1".to_string()) },
                SectorFact { label: "Software".to_string(), qid: None },
            ],
        };
        assert_eq!(result.labels(), vec!["Electronics", "Software"]);
    }
}
