//! Record store interface consumed by the search core.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use super::filter::{ProductFilter, Sort};
use super::record::Product;

/// Errors raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The text index failed to build, commit or execute a query.
    #[error("Text index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    /// The seed file could not be read.
    #[error("Failed to read catalog seed {path:?}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a valid product list.
    #[error("Failed to parse catalog seed {path:?}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two seed records share an identifier.
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),
}

/// Paging and ordering for filter-only queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub sort: Sort,
    pub skip: usize,
    /// `None` returns every matching record after `skip`
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted(sort: Sort) -> Self {
        Self {
            sort,
            ..Default::default()
        }
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Min/max/avg summary of a numeric product attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Facet values the filter UI is built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterOptions {
    /// Distinct non-empty brands, sorted
    pub brands: Vec<String>,
    /// `None` on an empty catalog
    pub price: Option<NumericStats>,
    /// `None` on an empty catalog
    pub rating: Option<NumericStats>,
}

/// A product store queryable by structured filters and a text index.
///
/// Implementations own a pre-built text index over name, description,
/// brand and tags. Every call is an independent read except
/// [`RecordStore::record_view`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Text-index search restricted by `filter`.
    ///
    /// Returns at most `limit` `(product, text_score)` pairs ordered by text
    /// score descending, ties broken by `sort`.
    async fn find_by_text_and_filters(
        &self,
        filter: &ProductFilter,
        text: &str,
        sort: Sort,
        limit: usize,
    ) -> Result<Vec<(Product, f32)>, StoreError>;

    /// Filter-only query with no text constraint.
    async fn find_by_filters(
        &self,
        filter: &ProductFilter,
        options: FindOptions,
    ) -> Result<Vec<Product>, StoreError>;

    /// Count records matching `filter` and, when given, the text constraint.
    async fn count_by_filters(
        &self,
        filter: &ProductFilter,
        text: Option<&str>,
    ) -> Result<u64, StoreError>;

    /// The first `limit` records in insertion order.
    async fn candidate_window(&self, limit: usize) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// Increment a product's view count, returning the new value.
    async fn record_view(&self, id: &str) -> Result<Option<u64>, StoreError>;

    async fn filter_options(&self) -> Result<FilterOptions, StoreError>;

    /// Total number of records held.
    async fn total_records(&self) -> Result<usize, StoreError>;
}
