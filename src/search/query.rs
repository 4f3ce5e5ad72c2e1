//! Search requests and paginated results.

use serde::Serialize;

use super::error::SearchError;
use super::fuzzy::DEFAULT_FUZZY_THRESHOLD;
use crate::catalog::{Product, ProductFilter, Sort};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// A catalog search request.
///
/// Pagination and threshold values are clamped into range by
/// [`Query::normalized`]; structurally invalid filters are rejected by
/// [`Query::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Free-text term. Empty or whitespace-only means "no text search".
    pub term: String,
    pub filter: ProductFilter,
    pub sort: Sort,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    /// Minimum per-word similarity, in `(0, 1]`
    pub fuzzy_threshold: f32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            term: String::new(),
            filter: ProductFilter::default(),
            sort: Sort::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl Query {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f32) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// The search term with surrounding whitespace removed, or `None` when
    /// there is nothing to search for.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.term.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Number of records before the requested page.
    pub fn skip(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.page_size)
    }

    /// Clamp pagination into `1..` and `1..=max_page_size`, and the fuzzy
    /// threshold into `(0, 1]` (non-positive or NaN falls back to the default).
    pub fn normalized(mut self, max_page_size: usize) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, max_page_size.max(1));
        self.fuzzy_threshold = if self.fuzzy_threshold.is_nan() || self.fuzzy_threshold <= 0.0 {
            DEFAULT_FUZZY_THRESHOLD
        } else {
            self.fuzzy_threshold.min(1.0)
        };
        self
    }

    /// Reject filters no record could sensibly satisfy.
    pub fn validate(&self) -> Result<(), SearchError> {
        let bounds = [
            ("minPrice", self.filter.min_price),
            ("maxPrice", self.filter.max_price),
            ("minRating", self.filter.min_rating),
        ];
        for (name, value) in bounds {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(SearchError::InvalidQuery(format!("{} must be a finite number", name)));
            }
        }

        if let (Some(min), Some(max)) = (self.filter.min_price, self.filter.max_price) {
            if min > max {
                return Err(SearchError::InvalidQuery(format!(
                    "minPrice ({}) exceeds maxPrice ({})",
                    min, max
                )));
            }
        }

        Ok(())
    }
}

/// One page of ranked results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub products: Vec<Product>,
    /// Matching records according to the store's count query.
    ///
    /// For text searches this counts text-index matches only. Records that
    /// only the fuzzy fallback surfaced are not counted, so it can be lower
    /// than the number of records actually reachable by paging.
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: usize,
    pub page_size: usize,
    pub has_more: bool,
}

impl ResultPage {
    pub fn new(products: Vec<Product>, total_items: u64, page: usize, page_size: usize) -> Self {
        let total_pages = total_items.div_ceil(page_size.max(1) as u64);
        Self {
            products,
            total_items,
            total_pages,
            current_page: page,
            page_size,
            has_more: (page as u64) < total_pages,
        }
    }
}
