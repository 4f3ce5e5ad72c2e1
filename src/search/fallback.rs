//! Fuzzy candidate search over a filter-only scan of the store.

use async_trait::async_trait;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::error::SearchError;
use super::fuzzy::product_relevance;
use super::query::Query;
use super::traits::{CandidateSearch, ScoredRecord};
use crate::catalog::{FindOptions, RecordStore};
use crate::metrics::FUZZY_CANDIDATES_SCANNED;

/// Scores every record matching the structured filters with the fuzzy
/// matcher, ignoring the text index.
///
/// The `limit` passed to [`CandidateSearch::candidates`] bounds how many
/// records are fetched and scored. Records are fetched in the query's sort
/// order, so truncation drops the tail of that order.
pub struct FullScanFuzzySearch {
    store: Arc<dyn RecordStore>,
}

impl FullScanFuzzySearch {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CandidateSearch for FullScanFuzzySearch {
    async fn candidates(
        &self,
        query: &Query,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, SearchError> {
        let Some(text) = query.text() else {
            return Ok(Vec::new());
        };

        let start = Instant::now();

        // One extra record tells us whether the scan was truncated
        let options = FindOptions::sorted(query.sort).with_limit(limit.saturating_add(1));
        let mut scanned = self.store.find_by_filters(&query.filter, options).await?;
        if scanned.len() > limit {
            warn!(
                query = text,
                limit = limit,
                "Fuzzy scan truncated at candidate limit"
            );
            scanned.truncate(limit);
        }

        let threshold = query.fuzzy_threshold;
        let mut matched: Vec<ScoredRecord> = scanned
            .par_iter()
            .filter_map(|product| {
                let score = product_relevance(text, product, threshold);
                (score > 0.0).then(|| ScoredRecord::new(product.clone(), score))
            })
            .collect();
        matched.sort_by(|a, b| b.score.total_cmp(&a.score));

        FUZZY_CANDIDATES_SCANNED.observe(scanned.len() as f64);
        info!(
            search_type = "fuzzy",
            query = text,
            scanned = scanned.len(),
            results = matched.len(),
            threshold = threshold,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fuzzy scan completed"
        );

        Ok(matched)
    }

    fn search_type(&self) -> &'static str {
        "fuzzy"
    }
}
