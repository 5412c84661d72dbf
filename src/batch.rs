//! Query batching for exact-name searches.
//!
//! Each batch entry is the percent-encoded form of `<base> (!a or !b ...)`.
//! Entries are kept under [`MAX_QUERY_LENGTH`] so a single request never
//! exceeds what the search endpoint accepts, and every name lands in exactly
//! one entry.
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Upper bound (exclusive) on the encoded length of one batch entry.
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Characters `encodeURIComponent` leaves untouched besides alphanumerics.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query the way browsers encode a URI component.
pub fn encode_query(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

fn encoded_search(base_query: &str, name_filter: &str) -> String {
    encode_query(&format!("{base_query} ({name_filter})"))
}

/// Split `names` into encoded queries of the form `<base> (!a or !b ...)`.
///
/// Names are consumed in order. A name whose own clause already pushes the
/// query past the limit still gets an entry of its own; clauses are never
/// split.
pub fn build_batches(base_query: &str, names: &[String]) -> Vec<String> {
    let mut batches = Vec::new();
    let mut fragment = String::new();

    for name in names {
        let candidate = if fragment.is_empty() {
            format!("!{name}")
        } else {
            format!("{fragment} or !{name}")
        };

        if encoded_search(base_query, &candidate).len() >= MAX_QUERY_LENGTH {
            if !fragment.is_empty() {
                batches.push(encoded_search(base_query, &fragment));
            }
            fragment = format!("!{name}");
        } else {
            fragment = candidate;
        }
    }

    if !fragment.is_empty() {
        batches.push(encoded_search(base_query, &fragment));
    }

    tracing::debug!(
        names = names.len(),
        batches = batches.len(),
        "built search batches"
    );
    batches
}
