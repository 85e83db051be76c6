//! Correction data model decoded from the spell-check provider.
//!
//! The provider returns a JSON body with a `matches` array; we only consume
//! the fields below and ignore everything else. Matches compare structurally:
//! two equal matches are interchangeable when removing one from a session's
//! match list.

use serde::{Deserialize, Serialize};

/// One proposed correction inside a checked text.
///
/// `offset` and `length` are character positions into the text the check was
/// run against, not byte positions. They are kept signed so an out-of-range
/// value coming off the wire survives decoding and is rejected where the
/// range is actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub offset: i64,
    pub length: i64,
    pub message: String,
    pub replacements: Vec<Replacement>,
    pub rule: Rule,
}

impl Match {
    /// The preferred replacement, if the provider suggested any.
    pub fn preferred_replacement(&self) -> Option<&str> {
        self.replacements.first().map(|r| r.value.as_str())
    }
}

/// A candidate replacement string. Ordered by provider preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replacement {
    pub value: String,
}

/// The grammar/spelling rule a match was produced by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub category: Category,
}

/// Rule grouping (e.g. "Grammar", "Typos").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Top-level response body of the check endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub matches: Vec<Match>,
}
