//! ISIN validation and canonicalization.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::constants::ISIN_LENGTH;
use crate::errors::{MatchError, MatchResult};

/// Shape of a canonical ISIN: 2-letter country prefix, 9 alphanumeric
/// characters, 1 trailing check digit.
static ISIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{9}[0-9]$").expect("static pattern compiles"));

/// A validated, canonical ISIN.
///
/// Construction goes through [`Isin::parse`]; a value of this type always
/// holds the 12-character canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isin(String);

impl Isin {
    /// Validate and canonicalize a raw identifier.
    ///
    /// Applies NFKC normalization so compatibility-equivalent characters
    /// (fullwidth letters, ligatures) are tolerated, strips whitespace and
    /// hyphens, upper-cases, then checks the ISIN shape. Idempotent:
    /// parsing an already-canonical ISIN yields the same value.
    pub fn parse(raw: &str) -> MatchResult<Self> {
        if raw.trim().is_empty() {
            return Err(MatchError::InvalidIdentifier {
                input: raw.to_string(),
                reason: "empty input".to_string(),
            });
        }

        let canonical: String = raw
            .nfkc()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .flat_map(char::to_uppercase)
            .collect();

        let length = canonical.chars().count();
        if length != ISIN_LENGTH {
            return Err(MatchError::InvalidIdentifier {
                input: raw.to_string(),
                reason: format!("expected {ISIN_LENGTH} characters, got {length}"),
            });
        }

        if !ISIN_PATTERN.is_match(&canonical) {
            return Err(MatchError::InvalidIdentifier {
                input: raw.to_string(),
                reason: "expected 2 letters, 9 alphanumeric characters, and a trailing digit"
                    .to_string(),
            });
        }

        Ok(Self(canonical))
    }

    /// The canonical 12-character form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
