//! HTTP request handlers for the product API.

use axum::{
    extract::{Path, Query as QueryParams, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{error, info, warn};

use super::state::AppState;
use crate::catalog::{NumericStats, Product, ProductFilter, Sort, SortKey, SortOrder};
use crate::config::SearchConfig;
use crate::metrics;
use crate::search::{Query, SearchError};

/// Query parameters of `GET /api/products`.
///
/// Every value arrives as a string; empty strings count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub brand: Option<String>,
    pub min_rating: Option<String>,
    pub is_on_sale: Option<String>,
    pub is_featured: Option<String>,
    pub min_views: Option<String>,
    pub fuzzy_threshold: Option<String>,
}

impl ProductsParams {
    /// Convert raw parameters into a search query, filling gaps from `defaults`.
    pub fn into_query(self, defaults: &SearchConfig) -> Result<Query, SearchError> {
        let filter = ProductFilter {
            category: present(self.category_id),
            brand: present(self.brand),
            min_price: parse_param("minPrice", &self.min_price)?,
            max_price: parse_param("maxPrice", &self.max_price)?,
            min_rating: parse_param("minRating", &self.min_rating)?,
            is_on_sale: parse_param("isOnSale", &self.is_on_sale)?,
            is_featured: parse_param("isFeatured", &self.is_featured)?,
            min_views: parse_param("minViews", &self.min_views)?,
        };

        let key: SortKey = parse_param("sortBy", &self.sort_by)?.unwrap_or_default();
        let order: SortOrder = parse_param("sortOrder", &self.sort_order)?.unwrap_or_default();

        Ok(Query::new(self.search.unwrap_or_default())
            .with_filter(filter)
            .with_sort(Sort::new(key, order))
            .with_page(parse_param("page", &self.page)?.unwrap_or(1))
            .with_page_size(parse_param("limit", &self.limit)?.unwrap_or(defaults.default_limit))
            .with_fuzzy_threshold(
                parse_param("fuzzyThreshold", &self.fuzzy_threshold)?
                    .unwrap_or(defaults.fuzzy_threshold),
            ))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_param<T>(name: &str, value: &Option<String>) -> Result<Option<T>, SearchError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|e| {
            SearchError::InvalidQuery(format!("{} '{}' is invalid: {}", name, raw, e))
        }),
    }
}

/// Paginated product listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub success: bool,
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: usize,
    pub limit: usize,
    pub has_more: bool,
    pub search_term: String,
    pub fuzzy_threshold: f32,
    pub products: Vec<Product>,
}

/// Query parameters of the suggestion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub min_rating: f64,
    pub max_rating: f64,
    pub avg_rating: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsDto {
    pub brands: Vec<String>,
    pub price_range: PriceRange,
    pub rating_stats: RatingStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub success: bool,
    pub filter_options: FilterOptionsDto,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub success: bool,
    pub message: String,
    pub views: u64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Version
    pub version: String,
}

/// JSON error body: `{success: false, message, error}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Option<String>,
}

impl ApiError {
    fn from_search(err: SearchError, message: &str) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status.is_server_error() {
            error!(error = %err, "{}", message);
        } else {
            warn!(error = %err, "Rejected request");
        }
        Self {
            status,
            message: message.to_string(),
            error: Some(err.to_string()),
        }
    }

    fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
            error: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "success": false,
            "message": self.message,
        });
        if let Some(error) = self.error {
            body["error"] = serde_json::Value::String(error);
        }
        (self.status, Json(body)).into_response()
    }
}

/// Search, filter, sort and paginate products.
///
/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ProductsParams>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let search_term = params.search.clone().unwrap_or_default();
    let query = params
        .into_query(&state.config.search)
        .map_err(|e| ApiError::from_search(e, "Invalid query parameters"))?
        .normalized(state.config.search.max_page_size);
    let fuzzy_threshold = query.fuzzy_threshold;

    let page = state
        .search
        .search(query)
        .await
        .map_err(|e| ApiError::from_search(e, "Error fetching products"))?;

    Ok(Json(ProductsResponse {
        success: true,
        total_items: page.total_items,
        total_pages: page.total_pages,
        current_page: page.current_page,
        limit: page.page_size,
        has_more: page.has_more,
        search_term,
        fuzzy_threshold,
        products: page.products,
    }))
}

/// Autocomplete suggestions for a partial term.
///
/// GET /api/products/search-suggestions?q=
pub async fn search_suggestions(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SuggestionParams>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let term = params.q.unwrap_or_default();
    let suggestions = state
        .search
        .suggest(
            &term,
            state.config.search.suggestion_window,
            state.config.search.suggestion_limit,
        )
        .await
        .map_err(|e| ApiError::from_search(e, "Error getting search suggestions"))?;

    Ok(Json(SuggestionsResponse {
        success: true,
        suggestions,
    }))
}

/// Brands plus price and rating ranges for the filter UI.
///
/// GET /api/products/filters
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    let options = state
        .search
        .store()
        .filter_options()
        .await
        .map_err(|e| ApiError::from_search(e.into(), "Error getting filter options"))?;

    let price = options.price.unwrap_or(NumericStats {
        min: 0.0,
        max: 1000.0,
        avg: 100.0,
    });
    let rating = options.rating.unwrap_or(NumericStats {
        min: 0.0,
        max: 5.0,
        avg: 0.0,
    });

    Ok(Json(FilterOptionsResponse {
        success: true,
        filter_options: FilterOptionsDto {
            brands: options.brands,
            price_range: PriceRange {
                min_price: price.min,
                max_price: price.max,
                avg_price: price.avg,
            },
            rating_stats: RatingStats {
                min_rating: rating.min,
                max_rating: rating.max,
                avg_rating: rating.avg,
            },
        },
    }))
}

/// Fetch one product.
///
/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .search
        .store()
        .get(&id)
        .await
        .map_err(|e| ApiError::from_search(e.into(), "Error fetching product"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

/// Increment a product's view count.
///
/// POST /api/products/{id}/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewResponse>, ApiError> {
    let views = state
        .search
        .store()
        .record_view(&id)
        .await
        .map_err(|e| ApiError::from_search(e.into(), "Error incrementing views"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    info!(product = %id, views = views, "View recorded");

    Ok(Json(ViewResponse {
        success: true,
        message: "Views incremented".to_string(),
        views,
    }))
}

/// Health check endpoint.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prometheus metrics endpoint.
///
/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    let output = metrics::gather_metrics();
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], output)
}
