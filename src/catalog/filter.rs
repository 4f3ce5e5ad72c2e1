//! Structured filter predicates and sort orders over catalog products.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::record::Product;

/// Structured predicates applied to every store query.
///
/// All set predicates are AND-ed. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub is_on_sale: Option<bool>,
    pub is_featured: Option<bool>,
    pub min_views: Option<u64>,
}

impl ProductFilter {
    /// Check whether a product satisfies every set predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(ref brand) = self.brand {
            if product.brand.as_deref() != Some(brand.as_str()) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.min_rating.is_some_and(|min| product.rating < min) {
            return false;
        }
        if self.is_on_sale.is_some_and(|flag| product.is_on_sale != flag) {
            return false;
        }
        if self.is_featured.is_some_and(|flag| product.is_featured != flag) {
            return false;
        }
        if self.min_views.is_some_and(|min| product.views < min) {
            return false;
        }
        true
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Field a result list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Price,
    Rating,
    Views,
    Name,
    ReviewCount,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "views" => Ok(Self::Views),
            "name" => Ok(Self::Name),
            "reviewCount" | "review_count" => Ok(Self::ReviewCount),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedAt => write!(f, "createdAt"),
            Self::Price => write!(f, "price"),
            Self::Rating => write!(f, "rating"),
            Self::Views => write!(f, "views"),
            Self::Name => write!(f, "name"),
            Self::ReviewCount => write!(f, "reviewCount"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Sort key plus direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Compare two products under this sort. Ties compare equal so that
    /// stable sorts keep the incoming order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Rating => a.rating.total_cmp(&b.rating),
            SortKey::Views => a.views.cmp(&b.views),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::ReviewCount => a.review_count.cmp(&b.review_count),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Product {
        Product::new("iPhone 15 Pro", 999.0)
            .with_brand("Apple")
            .with_category("electronics")
            .with_rating(4.7)
            .with_views(2100)
            .featured(true)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&phone()));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let filter = ProductFilter {
            min_price: Some(999.0),
            max_price: Some(999.0),
            ..Default::default()
        };
        assert!(filter.matches(&phone()));

        let filter = ProductFilter {
            max_price: Some(998.99),
            ..Default::default()
        };
        assert!(!filter.matches(&phone()));
    }

    #[test]
    fn test_flag_and_reference_predicates() {
        let filter = ProductFilter {
            brand: Some("Apple".to_string()),
            category: Some("electronics".to_string()),
            is_featured: Some(true),
            is_on_sale: Some(false),
            min_rating: Some(4.5),
            min_views: Some(2000),
            ..Default::default()
        };
        assert!(filter.matches(&phone()));

        let filter = ProductFilter {
            brand: Some("Samsung".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&phone()));

        let filter = ProductFilter {
            is_on_sale: Some(true),
            ..Default::default()
        };
        assert!(!filter.matches(&phone()));
    }

    #[test]
    fn test_brand_filter_rejects_missing_brand() {
        let filter = ProductFilter {
            brand: Some("Apple".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&Product::new("Yoga Mat", 35.0)));
    }

    #[test]
    fn test_sort_compare_directions() {
        let cheap = Product::new("Yoga Mat", 35.0);
        let pricey = phone();

        let asc = Sort::new(SortKey::Price, SortOrder::Asc);
        assert_eq!(asc.compare(&cheap, &pricey), Ordering::Less);

        let desc = Sort::new(SortKey::Price, SortOrder::Desc);
        assert_eq!(desc.compare(&cheap, &pricey), Ordering::Greater);
    }

    #[test]
    fn test_parse_sort_key_and_order() {
        assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert_eq!("views".parse::<SortKey>().unwrap(), SortKey::Views);
        assert!("color".parse::<SortKey>().is_err());
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
