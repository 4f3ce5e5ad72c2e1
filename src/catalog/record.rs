//! Product records as held by the catalog store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A catalog product.
///
/// Records are read-only for the search core. Relevance scores computed
/// during ranking live in a side table keyed by [`Product::id`] and are
/// never written onto the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier, unique within a store
    #[serde(default = "generate_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    /// Price before any discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Category reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Average rating in `0.0..=5.0`
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specifications: BTreeMap<String, String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl Product {
    /// Create a product with the given name and price and defaults elsewhere.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            description: None,
            price,
            original_price: None,
            image_url: None,
            category: None,
            brand: None,
            rating: 0.0,
            review_count: 0,
            views: 0,
            is_on_sale: false,
            is_featured: false,
            stock: 0,
            tags: Vec::new(),
            specifications: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }

    pub fn on_sale(mut self, on_sale: bool) -> Self {
        self.is_on_sale = on_sale;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.is_featured = featured;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Tags joined by single spaces, as scored by the fuzzy matcher.
    pub fn joined_tags(&self) -> String {
        self.tags.join(" ")
    }
}
