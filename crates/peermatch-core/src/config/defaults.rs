//! Default values backing the `Default` impls.

pub const DEFAULT_DB_PATH: &str = "data/companies.db";
pub const DEFAULT_INDEX_URL: &str = "http://localhost:8000";
pub const DEFAULT_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";
pub const DEFAULT_INDEX_TIMEOUT_SECS: u64 = 30;
