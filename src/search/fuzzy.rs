//! Word-level fuzzy matching of a search phrase against product text.

use super::similarity::similarity;
use crate::catalog::Product;

/// Default minimum per-word similarity for a word to count as matched.
pub const DEFAULT_FUZZY_THRESHOLD: f32 = 0.3;

/// Score how well `search_term` matches `text`, in `[0, 1]`.
///
/// Both inputs are lowercased and split on whitespace. Each search word takes
/// its best score over the text words: containment in either direction scores
/// 1 outright, otherwise the edit-distance [`similarity`] is used. Only words
/// whose best score reaches `threshold` contribute, and the sum is divided by
/// the total number of search words, so unmatched words pull the score down.
///
/// Returns 0 when either input has no words or no search word matches.
pub fn fuzzy_match(search_term: &str, text: &str, threshold: f32) -> f32 {
    let search_lower = search_term.to_lowercase();
    let text_lower = text.to_lowercase();

    let search_words: Vec<&str> = search_lower.split_whitespace().collect();
    let text_words: Vec<&str> = text_lower.split_whitespace().collect();

    if search_words.is_empty() || text_words.is_empty() {
        return 0.0;
    }

    let mut total_score = 0.0;
    let mut matched_words = 0usize;

    for search_word in &search_words {
        let best_score = best_word_score(search_word, &text_words);
        if best_score >= threshold {
            total_score += best_score;
            matched_words += 1;
        }
    }

    if matched_words > 0 {
        total_score / search_words.len() as f32
    } else {
        0.0
    }
}

fn best_word_score(search_word: &str, text_words: &[&str]) -> f32 {
    let mut best_score = 0.0f32;

    for text_word in text_words {
        if text_word.contains(search_word) || search_word.contains(text_word) {
            return 1.0;
        }
        best_score = best_score.max(similarity(search_word, text_word));
    }

    best_score
}

/// Best fuzzy score of `search_term` over a product's name, description,
/// brand and space-joined tags.
pub fn product_relevance(search_term: &str, product: &Product, threshold: f32) -> f32 {
    let name = fuzzy_match(search_term, &product.name, threshold);
    let description = product
        .description
        .as_deref()
        .map_or(0.0, |d| fuzzy_match(search_term, d, threshold));
    let brand = product
        .brand
        .as_deref()
        .map_or(0.0, |b| fuzzy_match(search_term, b, threshold));
    let tags = fuzzy_match(search_term, &product.joined_tags(), threshold);

    name.max(description).max(brand).max(tags)
}
