//! Candidate search trait for the strategies behind the hybrid orchestrator.
//!
//! Two strategies implement it: the text-index lookup
//! ([`PrimaryIndexSearch`](super::PrimaryIndexSearch)) and the in-process
//! fuzzy scan ([`FullScanFuzzySearch`](super::FullScanFuzzySearch)).

use async_trait::async_trait;

use super::error::SearchError;
use super::query::Query;
use crate::catalog::Product;

/// Common trait for candidate-producing search strategies.
#[async_trait]
pub trait CandidateSearch: Send + Sync {
    /// Produce scored candidates for the query's term and filters.
    ///
    /// # Arguments
    /// * `query` - The normalised search query
    /// * `limit` - Upper bound on records fetched from the store
    ///
    /// # Returns
    /// Candidates sorted by relevance (highest score first). Queries without a
    /// search term produce no candidates.
    async fn candidates(&self, query: &Query, limit: usize)
        -> Result<Vec<ScoredRecord>, SearchError>;

    /// Get the strategy identifier, such as "primary" or "fuzzy".
    fn search_type(&self) -> &'static str;
}

/// A product paired with the score its strategy assigned it.
#[derive(Debug, Clone)]
pub struct ScoredRecord {
    pub product: Product,
    pub score: f32,
}

impl ScoredRecord {
    pub fn new(product: Product, score: f32) -> Self {
        Self { product, score }
    }
}
