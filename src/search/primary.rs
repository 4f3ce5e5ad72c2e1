//! Candidate search backed by the store's text index.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::error::SearchError;
use super::query::Query;
use super::traits::{CandidateSearch, ScoredRecord};
use crate::catalog::RecordStore;

/// Text-index search restricted by the query's structured filters.
///
/// Scores are the index's native BM25 relevance, so they are not bounded
/// to `[0, 1]`.
pub struct PrimaryIndexSearch {
    store: Arc<dyn RecordStore>,
}

impl PrimaryIndexSearch {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CandidateSearch for PrimaryIndexSearch {
    async fn candidates(
        &self,
        query: &Query,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, SearchError> {
        let Some(text) = query.text() else {
            return Ok(Vec::new());
        };

        let start = Instant::now();
        let hits = self
            .store
            .find_by_text_and_filters(&query.filter, text, query.sort, limit)
            .await?;

        info!(
            search_type = "primary",
            query = text,
            results = hits.len(),
            limit = limit,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Primary index search completed"
        );

        Ok(hits
            .into_iter()
            .map(|(product, score)| ScoredRecord::new(product, score))
            .collect())
    }

    fn search_type(&self) -> &'static str {
        "primary"
    }
}
