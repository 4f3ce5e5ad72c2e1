//! Hybrid search combining the text index with a fuzzy fallback scan.
//!
//! The text index is queried first. When it cannot fill the requested page,
//! every record passing the structured filters is fuzzy-scored in process and
//! the two result sets are merged, deduplicated by product id and re-ranked.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error::SearchError;
use super::fallback::FullScanFuzzySearch;
use super::primary::PrimaryIndexSearch;
use super::query::{Query, ResultPage};
use super::suggest::{suggestions, MIN_SUGGESTION_CHARS};
use super::traits::{CandidateSearch, ScoredRecord};
use crate::catalog::{FindOptions, Product, RecordStore};
use crate::metrics::{
    FUZZY_FALLBACKS, SEARCH_LATENCY, SEARCH_REQUESTS, SEARCH_RESULTS, SUGGESTION_REQUESTS,
};

/// Default multiple of the page size requested from the text index.
pub const DEFAULT_PRIMARY_OVERFETCH: usize = 2;

/// Default cap on records scored by the fuzzy fallback.
pub const DEFAULT_MAX_SCAN_CANDIDATES: usize = 10_000;

/// Default upper bound on page size.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Whether the text index produced enough hits to serve a page on its own.
///
/// The fallback scan runs only when the index returned fewer hits than one
/// full page.
pub fn primary_fills_page(primary_hits: usize, page_size: usize) -> bool {
    primary_hits >= page_size
}

/// Hybrid search orchestrator.
///
/// Owns the store handle for filter-only listings and counts, and two
/// candidate strategies: the text-index search and the fuzzy scan.
pub struct HybridSearch {
    store: Arc<dyn RecordStore>,
    primary: Arc<dyn CandidateSearch>,
    fallback: Arc<dyn CandidateSearch>,
    /// Text-index fetch size as a multiple of the page size
    primary_overfetch: usize,
    /// Upper bound on records fetched by the fallback scan
    max_scan_candidates: usize,
    max_page_size: usize,
    /// Widen the text-index window to reach pages past the overfetch
    deep_paging: bool,
}

impl HybridSearch {
    /// Create a hybrid search over `store` with the default strategies.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let primary = Arc::new(PrimaryIndexSearch::new(Arc::clone(&store)));
        let fallback = Arc::new(FullScanFuzzySearch::new(Arc::clone(&store)));
        Self::with_strategies(store, primary, fallback)
    }

    /// Create a hybrid search with custom candidate strategies.
    pub fn with_strategies(
        store: Arc<dyn RecordStore>,
        primary: Arc<dyn CandidateSearch>,
        fallback: Arc<dyn CandidateSearch>,
    ) -> Self {
        Self {
            store,
            primary,
            fallback,
            primary_overfetch: DEFAULT_PRIMARY_OVERFETCH,
            max_scan_candidates: DEFAULT_MAX_SCAN_CANDIDATES,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            deep_paging: false,
        }
    }

    pub fn with_primary_overfetch(mut self, overfetch: usize) -> Self {
        self.primary_overfetch = overfetch.max(1);
        self
    }

    pub fn with_max_scan_candidates(mut self, max: usize) -> Self {
        self.max_scan_candidates = max;
        self
    }

    pub fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = max.max(1);
        self
    }

    /// Let the text-index window grow with the page number.
    ///
    /// Off by default: the window is `overfetch × page_size`, so fast-path
    /// pages beyond it come back empty.
    pub fn with_deep_paging(mut self, enabled: bool) -> Self {
        self.deep_paging = enabled;
        self
    }

    /// Text-index fetch size for a query.
    fn primary_window(&self, query: &Query) -> usize {
        let window = query.page_size.saturating_mul(self.primary_overfetch);
        if self.deep_paging {
            window.max(query.skip().saturating_add(query.page_size))
        } else {
            window
        }
    }

    /// Get access to the underlying record store.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Run a search and return one ranked page.
    ///
    /// Any store failure aborts the request; no partial page is returned.
    pub async fn search(&self, query: Query) -> Result<ResultPage, SearchError> {
        SEARCH_REQUESTS.inc();
        let start = Instant::now();

        let query = query.normalized(self.max_page_size);
        query.validate()?;

        let text = query.text();
        let (ranked, total_items) = tokio::join!(
            self.page_products(&query),
            self.store.count_by_filters(&query.filter, text)
        );
        let (products, strategy) = ranked?;
        let total_items = total_items?;

        let page = ResultPage::new(products, total_items, query.page, query.page_size);

        let elapsed = start.elapsed();
        SEARCH_LATENCY.observe(elapsed.as_secs_f64());
        SEARCH_RESULTS.observe(page.products.len() as f64);
        info!(
            search_type = "hybrid",
            strategy = strategy,
            query = text.unwrap_or(""),
            page = page.current_page,
            results = page.products.len(),
            total_items = page.total_items,
            elapsed_ms = elapsed.as_millis() as u64,
            "Search completed"
        );

        Ok(page)
    }

    /// One page of products plus the name of the strategy that ranked it.
    async fn page_products(
        &self,
        query: &Query,
    ) -> Result<(Vec<Product>, &'static str), SearchError> {
        if query.text().is_none() {
            let options = FindOptions::sorted(query.sort)
                .with_skip(query.skip())
                .with_limit(query.page_size);
            let products = self.store.find_by_filters(&query.filter, options).await?;
            return Ok((products, "filter"));
        }

        let primary = self
            .primary
            .candidates(query, self.primary_window(query))
            .await?;

        let (ranked, strategy) = if primary_fills_page(primary.len(), query.page_size) {
            debug!(
                search_type = self.primary.search_type(),
                hits = primary.len(),
                "Text index filled the page"
            );
            let ranked: Vec<Product> = primary.into_iter().map(|r| r.product).collect();
            (ranked, self.primary.search_type())
        } else {
            FUZZY_FALLBACKS.inc();
            debug!(
                search_type = self.fallback.search_type(),
                hits = primary.len(),
                page_size = query.page_size,
                "Text index under-filled the page, running fallback"
            );
            let fuzzy = self
                .fallback
                .candidates(query, self.max_scan_candidates)
                .await?;
            (merge_ranked(primary, fuzzy), self.fallback.search_type())
        };

        let page = ranked
            .into_iter()
            .skip(query.skip())
            .take(query.page_size)
            .collect();
        Ok((page, strategy))
    }

    /// Autocomplete suggestions over the first `window` records.
    pub async fn suggest(
        &self,
        term: &str,
        window: usize,
        limit: usize,
    ) -> Result<Vec<String>, SearchError> {
        SUGGESTION_REQUESTS.inc();

        if term.chars().count() < MIN_SUGGESTION_CHARS {
            return Ok(Vec::new());
        }

        let candidates = self.store.candidate_window(window).await?;
        let found = suggestions(term, &candidates, limit);
        debug!(term = term, suggestions = found.len(), "Suggestions generated");
        Ok(found)
    }
}

/// Merge text-index hits with fuzzy hits and rank them.
///
/// Text-index hits come first and win on id collisions, keeping their index
/// score. Fuzzy hits for ids not already present are appended. The merged
/// list is stable-sorted by fuzzy score if present, else index score.
pub fn merge_ranked(primary: Vec<ScoredRecord>, fuzzy: Vec<ScoredRecord>) -> Vec<Product> {
    let mut text_scores: HashMap<String, f32> = HashMap::with_capacity(primary.len());
    let mut fuzzy_scores: HashMap<String, f32> = HashMap::with_capacity(fuzzy.len());
    let mut merged: Vec<Product> = Vec::with_capacity(primary.len() + fuzzy.len());

    for record in primary {
        if text_scores.contains_key(&record.product.id) {
            continue;
        }
        text_scores.insert(record.product.id.clone(), record.score);
        merged.push(record.product);
    }

    for record in fuzzy {
        if text_scores.contains_key(&record.product.id)
            || fuzzy_scores.contains_key(&record.product.id)
        {
            continue;
        }
        fuzzy_scores.insert(record.product.id.clone(), record.score);
        merged.push(record.product);
    }

    let relevance = |product: &Product| -> f32 {
        fuzzy_scores
            .get(&product.id)
            .or_else(|| text_scores.get(&product.id))
            .copied()
            .unwrap_or(0.0)
    };
    merged.sort_by(|a, b| relevance(b).total_cmp(&relevance(a)));

    merged
}
