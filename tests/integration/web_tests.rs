use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use catalog_search::metrics;
use catalog_search::web::{create_router, AppState};

use crate::helpers::test_catalog::TestCatalog;

async fn request(state: AppState, method: Method, uri: &str) -> Result<(StatusCode, Value)> {
    let response = create_router(state)
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_products_endpoint_end_to_end() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let (status, body) = request(
        catalog.state(),
        Method::GET,
        "/api/products?search=iphone&fuzzyThreshold=0.3&page=1&limit=12",
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["searchTerm"], "iphone");
    let threshold = body["fuzzyThreshold"].as_f64().unwrap_or_default();
    assert!((threshold - 0.3).abs() < 1e-6);

    let products = body["products"].as_array().expect("products array");
    assert!(products.len() <= 12);
    assert_eq!(products[0]["name"], "iPhone 15 Pro");

    let position = |name: &str| products.iter().position(|p| p["name"] == name);
    if let Some(mat) = position("Yoga Mat") {
        assert!(mat > 0);
    }

    let total_pages = body["totalPages"].as_u64().unwrap_or_default();
    assert_eq!(body["hasMore"], Value::Bool(1 < total_pages));
    Ok(())
}

#[tokio::test]
async fn test_products_endpoint_defaults_and_paging() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let (_, body) = request(catalog.state(), Method::GET, "/api/products").await?;
    assert_eq!(body["totalItems"], 16);
    assert_eq!(body["limit"], 12);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["hasMore"], true);
    // Newest first by default
    assert_eq!(body["products"][0]["id"], "pro-hair-dryer");

    let (_, body) = request(catalog.state(), Method::GET, "/api/products?page=2").await?;
    assert_eq!(body["products"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["hasMore"], false);
    Ok(())
}

#[tokio::test]
async fn test_category_and_brand_filters() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let (_, body) = request(
        catalog.state(),
        Method::GET,
        "/api/products?categoryId=electronics&brand=Apple&sortBy=price&sortOrder=asc",
    )
    .await?;

    let names: Vec<&str> = body["products"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert_eq!(names, vec!["iPad Air", "iPhone 15 Pro", "MacBook Pro 16\""]);
    Ok(())
}

#[tokio::test]
async fn test_view_counter_round_trip() -> Result<()> {
    let catalog = TestCatalog::seeded()?;
    let state = catalog.state();

    let (status, body) = request(state.clone(), Method::POST, "/api/products/yoga-mat/view").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["views"], 751);

    let (_, body) = request(state, Method::GET, "/api/products/yoga-mat").await?;
    assert_eq!(body["product"]["views"], 751);
    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_search_counters() -> Result<()> {
    metrics::register_metrics();
    let catalog = TestCatalog::seeded()?;

    request(catalog.state(), Method::GET, "/api/products?search=galxy").await?;

    let response = create_router(catalog.state())
        .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let text = String::from_utf8(bytes.to_vec())?;
    assert!(text.contains("catalog_search_requests_total"));
    assert!(text.contains("catalog_search_fuzzy_fallbacks_total"));
    Ok(())
}
