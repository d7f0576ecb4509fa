//! SPARQL query construction and result parsing.
//!
//! The knowledge base keys entities by LEI (`wdt:P1278`) and exposes the
//! sector through `wdt:P452`; labels resolve through the English label
//! service. Responses follow the standard
//! `{"results": {"bindings": [...]}}` shape.

use std::collections::HashMap;

use serde::Deserialize;

use peermatch_core::errors::EnrichmentError;
use peermatch_core::models::{EnrichmentResult, SectorFact};

/// Single-LEI query: item, description, and optional industry rows.
pub fn single_query(lei: &str) -> String {
    format!(
        r#"SELECT ?item ?itemDescription ?industry ?industryLabel WHERE {{
  ?item wdt:P1278 "{lei}".
  OPTIONAL {{ ?item wdt:P452 ?industry. }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}"#
    )
}

/// Batched query: one `VALUES` inclusion filter over the chunk's LEIs.
///
/// LEIs are alphanumeric by construction (they come from the reference
/// load), so plain interpolation is safe here.
pub fn batch_query(leis: &[String]) -> String {
    let values = leis
        .iter()
        .map(|lei| format!("(\"{lei}\")"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        r#"SELECT ?item ?itemDescription ?industry ?industryLabel ?lei WHERE {{
  VALUES (?lei) {{ {values} }}
  ?item wdt:P1278 ?lei.
  OPTIONAL {{ ?item wdt:P452 ?industry. }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}"#
    )
}

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One result row. Every field is optional; absent bindings simply omit
/// the key.
#[derive(Debug, Default, Deserialize)]
pub struct Binding {
    pub item: Option<BoundValue>,
    #[serde(rename = "itemDescription")]
    pub item_description: Option<BoundValue>,
    pub industry: Option<BoundValue>,
    #[serde(rename = "industryLabel")]
    pub industry_label: Option<BoundValue>,
    pub lei: Option<BoundValue>,
}

#[derive(Debug, Deserialize)]
pub struct BoundValue {
    pub value: String,
}

pub fn parse_response(body: &str) -> Result<SparqlResponse, EnrichmentError> {
    serde_json::from_str(body).map_err(|e| EnrichmentError::MalformedResponse {
        reason: e.to_string(),
    })
}

/// Item URIs end with the QID.
fn qid_of(value: &str) -> String {
    value.rsplit('/').next().unwrap_or(value).to_string()
}

/// De-duplicate by (label, qid) pair, preserving response order.
fn push_sector(sectors: &mut Vec<SectorFact>, binding: &Binding) {
    let Some(label) = &binding.industry_label else {
        return;
    };
    let fact = SectorFact {
        label: label.value.clone(),
        qid: binding.industry.as_ref().map(|v| qid_of(&v.value)),
    };
    if !sectors.contains(&fact) {
        sectors.push(fact);
    }
}

/// Collapse single-LEI bindings into one result. The first binding carries
/// the item and description; every binding may carry a sector row.
pub fn collect_single(response: &SparqlResponse) -> EnrichmentResult {
    let bindings = &response.results.bindings;
    let Some(first) = bindings.first() else {
        return EnrichmentResult::empty();
    };
    let Some(item) = &first.item else {
        return EnrichmentResult::empty();
    };

    let mut result = EnrichmentResult {
        wikidata_id: Some(qid_of(&item.value)),
        description: first.item_description.as_ref().map(|v| v.value.clone()),
        sectors: Vec::new(),
    };
    for binding in bindings {
        push_sector(&mut result.sectors, binding);
    }
    result
}

/// Group batched bindings by LEI. Every requested LEI gets a key, filled
/// with an empty result when the response had nothing for it.
pub fn collect_batch(
    response: &SparqlResponse,
    requested: &[String],
) -> HashMap<String, EnrichmentResult> {
    let mut results: HashMap<String, EnrichmentResult> = HashMap::new();

    for binding in &response.results.bindings {
        let Some(lei) = &binding.lei else {
            continue;
        };
        let entry = results
            .entry(lei.value.clone())
            .or_insert_with(|| EnrichmentResult {
                wikidata_id: binding.item.as_ref().map(|v| qid_of(&v.value)),
                description: binding.item_description.as_ref().map(|v| v.value.clone()),
                sectors: Vec::new(),
            });
        push_sector(&mut entry.sectors, binding);
    }

    for lei in requested {
        results.entry(lei.clone()).or_insert_with(EnrichmentResult::empty);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_BODY: &str = r#"{
        "results": {
            "bindings": [
                {
                    "item": {"value": "http://www.wikidata.org/entity/Q312"},
                    "itemDescription": {"value": "technology company"},
                    "industry": {"value": "http://www.wikidata.org/entity/Q11650"},
                    "industryLabel": {"value": "Electronics"}
                },
                {
                    "item": {"value": "http://www.wikidata.org/entity/Q312"},
                    "itemDescription": {"value": "technology company"},
                    "industry": {"value": "http://www.wikidata.org/entity/Q11650"},
                    "industryLabel": {"value": "Electronics"}
                },
                {
                    "item": {"value": "http://www.wikidata.org/entity/Q312"},
                    "itemDescription": {"value": "technology company"},
                    "industry": {"value": "http://www.wikidata.org/entity/Q880371"},
                    "industryLabel": {"value": "Software"}
                }
            ]
        }
    }"#;

    #[test]
    fn single_query_embeds_the_lei() {
        let query = single_query("HWUPKR0MPOU8FGXBT394");
        assert!(query.contains("\"HWUPKR0MPOU8FGXBT394\""));
        assert!(query.contains("wdt:P1278"));
    }

    #[test]
    fn batch_query_lists_every_lei() {
        let leis = vec!["LEI0000000000000000A".to_string(), "LEI0000000000000000B".to_string()];
        let query = batch_query(&leis);
        assert!(query.contains("VALUES (?lei)"));
        assert!(query.contains("(\"LEI0000000000000000A\")"));
        assert!(query.contains("(\"LEI0000000000000000B\")"));
    }

    #[test]
    fn collect_single_extracts_qid_and_dedupes_sectors() {
        let response = parse_response(SINGLE_BODY).unwrap();
        let result = collect_single(&response);

        assert_eq!(result.wikidata_id.as_deref(), Some("Q312"));
        assert_eq!(result.description.as_deref(), Some("technology company"));
        assert_eq!(result.labels(), vec!["Electronics", "Software"]);
    }

    #[test]
    fn collect_single_without_bindings_is_empty() {
        let response = parse_response(r#"{"results": {"bindings": []}}"#).unwrap();
        assert!(collect_single(&response).is_empty());
    }

    #[test]
    fn collect_batch_groups_by_lei_and_fills_misses() {
        let body = r#"{
            "results": {
                "bindings": [
                    {
                        "lei": {"value": "LEI0000000000000000A"},
                        "item": {"value": "http://www.wikidata.org/entity/Q1"},
                        "itemDescription": {"value": "bank"},
                        "industryLabel": {"value": "Banking"}
                    },
                    {
                        "lei": {"value": "LEI0000000000000000A"},
                        "item": {"value": "http://www.wikidata.org/entity/Q1"},
                        "itemDescription": {"value": "bank"},
                        "industryLabel": {"value": "Banking"}
                    }
                ]
            }
        }"#;
        let requested = vec![
            "LEI0000000000000000A".to_string(),
            "LEI0000000000000000B".to_string(),
        ];
        let response = parse_response(body).unwrap();
        let results = collect_batch(&response, &requested);

        assert_eq!(results.len(), 2);
        let hit = &results["LEI0000000000000000A"];
        assert_eq!(hit.wikidata_id.as_deref(), Some("Q1"));
        assert_eq!(hit.labels(), vec!["Banking"]);
        assert!(results["LEI0000000000000000B"].is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_response("not json").is_err());
    }
}
