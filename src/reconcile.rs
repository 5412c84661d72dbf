//! Card list reconciliation against search results.
//!
//! Batches run one after another. A failed batch is recorded and skipped so
//! the remaining batches still count; its names simply stay missing.
use crate::batch::build_batches;
use crate::card_list::CardList;
use crate::report::{BatchFailure, Outcome, Report};
use crate::scryfall::{CardSearch, SearchOutcome};
use std::collections::HashSet;

/// Check that every name in `names` is returned by `base_query`.
pub fn check_cards(names: &CardList, base_query: &str, search: &dyn CardSearch) -> Report {
    let batches = build_batches(base_query, names.names());
    let mut missing: HashSet<&str> = names.names().iter().map(String::as_str).collect();
    let mut found = Vec::new();
    let mut failures = Vec::new();

    for (index, query) in batches.iter().enumerate() {
        let cards = match search.search(query) {
            Ok(SearchOutcome::Cards(cards)) => cards,
            Ok(SearchOutcome::NoResults) => {
                tracing::debug!(batch = index, "no cards matched batch");
                continue;
            }
            Err(err) => {
                let message = format!("{err:#}");
                tracing::warn!(batch = index, error = %message, "search batch failed");
                failures.push(BatchFailure {
                    batch: index,
                    message,
                });
                continue;
            }
        };

        tracing::debug!(batch = index, cards = cards.len(), "batch returned cards");
        for card in cards {
            missing.remove(card.name.to_lowercase().as_str());
            found.push(card.name);
        }
    }

    let missing: Vec<String> = names
        .names()
        .iter()
        .filter(|name| missing.contains(name.as_str()))
        .cloned()
        .collect();

    let outcome = if missing.is_empty() {
        Outcome::AllMatched
    } else if missing.len() == names.len() {
        Outcome::NoMatches
    } else {
        Outcome::Partial
    };

    tracing::info!(
        ?outcome,
        names = names.len(),
        found = found.len(),
        missing = missing.len(),
        failed_batches = failures.len(),
        "card check complete"
    );

    Report {
        outcome,
        found,
        missing,
        batches: batches.len(),
        failures,
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
