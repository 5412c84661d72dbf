//! Card search client.
//!
//! `CardSearch` is the seam between reconciliation and the network. The HTTP
//! implementation talks to a Scryfall-compatible `/cards/search` endpoint and
//! maps its responses onto [`SearchOutcome`]:
//!
//! - `200` with a `data` list: the cards on the returned page
//! - `404` (HTTP status or `status` field in the error body): no results
//! - anything else: an error for the caller to record
//!
//! Only the first page of results is read. Exact-name batches stay well under
//! a page worth of cards, so `has_more` is logged rather than followed.
use crate::config::ClientConfig;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Instant;

const NOT_FOUND: u16 = 404;
const ERROR_EXCERPT_BYTES: usize = 200;

/// A card object returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub name: String,
}

/// Result of one search request that reached the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Cards(Vec<Card>),
    NoResults,
}

/// Runs one already-encoded query against a card database.
pub trait CardSearch {
    fn search(&self, encoded_query: &str) -> Result<SearchOutcome>;
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    data: Vec<Card>,
    #[serde(default)]
    total_cards: Option<u64>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status: u16,
    #[serde(default)]
    details: Option<String>,
}

impl ErrorBody {
    fn details(&self) -> &str {
        self.details.as_deref().unwrap_or("no details")
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchBody {
    Page(SearchPage),
    Error(ErrorBody),
}

/// Blocking HTTP client for the search endpoint.
pub struct ScryfallClient {
    agent: ureq::Agent,
    endpoint: String,
    user_agent: String,
}

impl ScryfallClient {
    pub fn new(config: &ClientConfig) -> Self {
        // Status codes are classified from the body, so they must not surface
        // as transport errors.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .into();
        ScryfallClient {
            agent,
            endpoint: config.endpoint.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl CardSearch for ScryfallClient {
    fn search(&self, encoded_query: &str) -> Result<SearchOutcome> {
        let url = format!("{}?q={}", self.endpoint, encoded_query);
        let start = Instant::now();
        let mut response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .call()
            .with_context(|| format!("request {}", self.endpoint))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .context("read search response body")?;

        tracing::debug!(
            status,
            elapsed_ms = start.elapsed().as_millis(),
            query_len = encoded_query.len(),
            response_bytes = body.len(),
            "search request complete"
        );

        classify_response(status, &body)
    }
}

/// Longest prefix of `text` within `max_bytes` that ends on a char boundary.
fn excerpt(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Map an HTTP status and response body onto a search outcome.
fn classify_response(status: u16, body: &str) -> Result<SearchOutcome> {
    let parsed = serde_json::from_str::<SearchBody>(body);

    if (200..300).contains(&status) {
        return match parsed.context("parse search response JSON")? {
            SearchBody::Page(page) => {
                if page.has_more {
                    tracing::warn!(
                        total_cards = page.total_cards,
                        returned = page.data.len(),
                        "search has more pages; only the first is checked"
                    );
                }
                Ok(SearchOutcome::Cards(page.data))
            }
            SearchBody::Error(error) if error.status == NOT_FOUND => Ok(SearchOutcome::NoResults),
            SearchBody::Error(error) => Err(anyhow!(
                "search reported status {}: {}",
                error.status,
                error.details()
            )),
        };
    }

    match parsed {
        Ok(SearchBody::Error(error)) if error.status == NOT_FOUND => Ok(SearchOutcome::NoResults),
        _ if status == NOT_FOUND => Ok(SearchOutcome::NoResults),
        Ok(SearchBody::Error(error)) => Err(anyhow!(
            "search failed with HTTP {status}: {}",
            error.details()
        )),
        _ => Err(anyhow!(
            "search failed with HTTP {status}: {}",
            excerpt(body.trim(), ERROR_EXCERPT_BYTES)
        )),
    }
}
