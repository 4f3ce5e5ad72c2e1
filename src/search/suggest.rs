//! Autocomplete suggestions from product names, brands and tags.

use std::collections::HashSet;

use crate::catalog::Product;

/// Shortest term that produces suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 2;

/// Collect up to `limit` distinct names, brands and tags that contain `term`
/// case-insensitively, in first-seen order over `candidates`.
///
/// Matching is plain substring containment, not fuzzy. Terms shorter than
/// [`MIN_SUGGESTION_CHARS`] yield nothing.
pub fn suggestions(term: &str, candidates: &[Product], limit: usize) -> Vec<String> {
    if term.chars().count() < MIN_SUGGESTION_CHARS || limit == 0 {
        return Vec::new();
    }

    let term_lower = term.to_lowercase();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    let mut offer = |value: &str| {
        if value.to_lowercase().contains(&term_lower) && seen.insert(value.to_string()) {
            suggestions.push(value.to_string());
        }
    };

    for product in candidates {
        offer(&product.name);
        if let Some(ref brand) = product.brand {
            offer(brand);
        }
        for tag in &product.tags {
            offer(tag);
        }
    }

    suggestions.truncate(limit);
    suggestions
}
