//! In-memory record store backed by a Tantivy text index.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info};

use super::filter::{ProductFilter, Sort};
use super::record::Product;
use super::store::{FilterOptions, FindOptions, NumericStats, RecordStore, StoreError};
use super::text_index::TextIndex;

/// Record store holding the whole catalog in memory.
///
/// Products keep their insertion order. The text index is built once at
/// construction; view counts are the only mutable state and are not indexed.
pub struct InMemoryStore {
    products: RwLock<Vec<Product>>,
    positions: HashMap<String, usize>,
    text_index: TextIndex,
}

impl InMemoryStore {
    /// Build a store from products, rejecting duplicate identifiers.
    pub fn new(products: Vec<Product>) -> Result<Self, StoreError> {
        let mut positions = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if positions.insert(product.id.clone(), position).is_some() {
                return Err(StoreError::DuplicateId(product.id.clone()));
            }
        }

        let text_index = TextIndex::build(&products)?;

        Ok(Self {
            products: RwLock::new(products),
            positions,
            text_index,
        })
    }

    /// Load a store from a JSON array of products.
    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;

        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|source| StoreError::SeedParse {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded {} products from {:?}", products.len(), path);
        Self::new(products)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn text_hits(&self, text: &str) -> Result<Vec<(usize, f32)>, StoreError> {
        let hits = self.text_index.search(text)?;
        Ok(hits
            .into_iter()
            .filter_map(|(id, score)| self.positions.get(&id).map(|&pos| (pos, score)))
            .collect())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_by_text_and_filters(
        &self,
        filter: &ProductFilter,
        text: &str,
        sort: Sort,
        limit: usize,
    ) -> Result<Vec<(Product, f32)>, StoreError> {
        let hits = self.text_hits(text)?;
        let products = self.read();

        let mut matched: Vec<(&Product, f32)> = hits
            .into_iter()
            .map(|(pos, score)| (&products[pos], score))
            .filter(|(product, _)| filter.matches(product))
            .collect();

        matched.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| sort.compare(a.0, b.0)));

        debug!(
            text = text,
            matched = matched.len(),
            limit = limit,
            "Filtered text search"
        );

        Ok(matched
            .into_iter()
            .take(limit)
            .map(|(product, score)| (product.clone(), score))
            .collect())
    }

    async fn find_by_filters(
        &self,
        filter: &ProductFilter,
        options: FindOptions,
    ) -> Result<Vec<Product>, StoreError> {
        let products = self.read();

        let mut matched: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
        matched.sort_by(|a, b| options.sort.compare(a, b));

        let page = matched.into_iter().skip(options.skip);
        let page: Vec<Product> = match options.limit {
            Some(limit) => page.take(limit).cloned().collect(),
            None => page.cloned().collect(),
        };
        Ok(page)
    }

    async fn count_by_filters(
        &self,
        filter: &ProductFilter,
        text: Option<&str>,
    ) -> Result<u64, StoreError> {
        let products = self.read();

        let count = match text {
            Some(text) => {
                let positions: HashSet<usize> =
                    self.text_hits(text)?.into_iter().map(|(pos, _)| pos).collect();
                positions
                    .into_iter()
                    .filter(|&pos| filter.matches(&products[pos]))
                    .count()
            }
            None => products.iter().filter(|p| filter.matches(p)).count(),
        };

        Ok(count as u64)
    }

    async fn candidate_window(&self, limit: usize) -> Result<Vec<Product>, StoreError> {
        Ok(self.read().iter().take(limit).cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self
            .positions
            .get(id)
            .map(|&pos| self.read()[pos].clone()))
    }

    async fn record_view(&self, id: &str) -> Result<Option<u64>, StoreError> {
        let Some(&pos) = self.positions.get(id) else {
            return Ok(None);
        };

        let mut products = self.write();
        let product = &mut products[pos];
        product.views = product.views.saturating_add(1);
        Ok(Some(product.views))
    }

    async fn filter_options(&self) -> Result<FilterOptions, StoreError> {
        let products = self.read();

        let brands: BTreeSet<String> = products
            .iter()
            .filter_map(|p| p.brand.as_deref())
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();

        Ok(FilterOptions {
            brands: brands.into_iter().collect(),
            price: numeric_stats(products.iter().map(|p| p.price)),
            rating: numeric_stats(products.iter().map(|p| p.rating)),
        })
    }

    async fn total_records(&self) -> Result<usize, StoreError> {
        Ok(self.read().len())
    }
}

fn numeric_stats(values: impl Iterator<Item = f64>) -> Option<NumericStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    (count > 0).then(|| NumericStats {
        min,
        max,
        avg: sum / count as f64,
    })
}
