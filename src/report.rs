//! Check results and their text/JSON renderings.
use serde::Serialize;
use std::fmt;

/// Shown once when any batch request failed.
pub const QUERY_ERROR_MESSAGE: &str =
    "There was an error trying to query Scryfall; check the log output for details";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    AllMatched,
    NoMatches,
    Partial,
}

/// A batch request that did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub batch: usize,
    pub message: String,
}

/// Classified result of one card check.
///
/// `found` keeps the remote casing and may repeat a name once per printing.
/// `missing` holds normalized names in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub batches: usize,
    pub failures: Vec<BatchFailure>,
}

impl Report {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("serialize report")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::AllMatched => write!(f, "All cards matched query."),
            Outcome::NoMatches => write!(f, "No cards matched query."),
            Outcome::Partial => write!(
                f,
                "Mixed results.\n\nFound cards:\n{}\n\nMissing cards:\n{}",
                self.found.join("\n"),
                self.missing.join("\n")
            ),
        }
    }
}
