//! Card list parsing.
//!
//! Deck exports usually prefix each line with a quantity (`4 Forest`,
//! `4x Forest`). The prefix is stripped, names are normalized to lower case,
//! and repeated names collapse to their first occurrence.
use regex::Regex;
use std::collections::HashSet;

/// Normalized, de-duplicated card names in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardList {
    names: Vec<String>,
}

impl CardList {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for CardList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for raw in iter {
            let name = raw.trim().to_lowercase();
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            names.push(name);
        }
        CardList { names }
    }
}

/// Parse a newline-delimited card list.
///
/// Every line matches the quantity pattern (all parts are optional), so a line
/// without a prefix passes through whole. Only ASCII digits count as a quantity.
pub fn parse_card_list(text: &str) -> CardList {
    let quantity = Regex::new(r"^[0-9]*x?\s*([^\r\n]*)").expect("regex for quantity prefix");
    text.split('\n')
        .map(|line| match quantity.captures(line) {
            Some(cap) => cap
                .get(1)
                .map(|m| m.as_str())
                .unwrap_or_default()
                .to_string(),
            None => line.to_string(),
        })
        .collect()
}
