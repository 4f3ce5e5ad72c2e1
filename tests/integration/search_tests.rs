use anyhow::Result;
use std::collections::HashSet;

use catalog_search::catalog::{Product, ProductFilter, Sort, SortKey, SortOrder};
use catalog_search::config::Config;
use catalog_search::Query;

use crate::helpers::test_catalog::TestCatalog;

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_iphone_ranks_above_unrelated_products() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let query = Query::new("iphone")
        .with_fuzzy_threshold(0.3)
        .with_page(1)
        .with_page_size(12);
    let page = catalog.search.search(query).await?;

    assert!(!page.products.is_empty());
    assert!(page.products.len() <= 12);
    assert_eq!(page.products[0].name, "iPhone 15 Pro");
    assert_eq!(page.products[0].brand.as_deref(), Some("Apple"));
    assert!(page.products.iter().all(|p| p.name != "Yoga Mat"));
    assert_eq!(page.has_more, (page.current_page as u64) < page.total_pages);

    let unique: HashSet<&str> = ids(&page.products).into_iter().collect();
    assert_eq!(unique.len(), page.products.len());

    Ok(())
}

#[tokio::test]
async fn test_typo_is_recovered_by_fuzzy_scan() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let page = catalog.search.search(Query::new("galxy")).await?;

    assert_eq!(page.products[0].id, "galaxy-s24");
    Ok(())
}

#[tokio::test]
async fn test_total_counts_text_index_matches_only() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    // The misspelling has no text-index hits, only fuzzy ones
    let page = catalog.search.search(Query::new("galxy")).await?;

    assert!(!page.products.is_empty());
    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_more);
    Ok(())
}

#[tokio::test]
async fn test_search_respects_structured_filters() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let filter = ProductFilter {
        is_on_sale: Some(true),
        ..Default::default()
    };
    let page = catalog
        .search
        .search(Query::new("nike").with_filter(filter))
        .await?;

    assert_eq!(page.products[0].id, "nike-air-force-1");
    assert!(page.products.iter().all(|p| p.is_on_sale));
    assert!(!ids(&page.products).contains(&"nike-running-shoes"));
    Ok(())
}

#[tokio::test]
async fn test_listing_without_term_sorts_and_pages() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let query = Query::default()
        .with_sort(Sort::new(SortKey::Price, SortOrder::Asc))
        .with_page(2)
        .with_page_size(5);
    let page = catalog.search.search(query).await?;

    assert_eq!(page.total_items, 16);
    assert_eq!(page.total_pages, 4);
    assert!(page.has_more);
    assert_eq!(page.products.len(), 5);
    assert_eq!(page.products[0].price, 75.0);
    assert!(page
        .products
        .windows(2)
        .all(|pair| pair[0].price <= pair[1].price));
    Ok(())
}

#[tokio::test]
async fn test_pages_of_text_hits_do_not_overlap() -> Result<()> {
    let catalog = TestCatalog::seeded()?;

    let first = catalog
        .search
        .search(Query::new("apple").with_page_size(2))
        .await?;
    let second = catalog
        .search
        .search(Query::new("apple").with_page(2).with_page_size(2))
        .await?;

    assert_eq!(first.total_items, 3);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_more);
    assert!(!second.has_more);
    assert_eq!(first.products.len(), 2);
    assert_eq!(second.products.len(), 1);

    let mut seen: HashSet<&str> = ids(&first.products).into_iter().collect();
    for id in ids(&second.products) {
        assert!(seen.insert(id), "{} appeared on both pages", id);
    }
    Ok(())
}

#[tokio::test]
async fn test_suggestions_from_seed_catalog() -> Result<()> {
    let catalog = TestCatalog::seeded()?;
    let limit = catalog.config.search.suggestion_limit;

    let found = catalog
        .search
        .suggest("ip", catalog.config.search.suggestion_window, limit)
        .await?;

    assert_eq!(found.len(), limit);
    assert_eq!(&found[..4], ["iPhone 15 Pro", "iphone", "iPad Air", "ipad"]);
    assert!(!found.iter().any(|s| s.contains("IKEA")));
    Ok(())
}

#[tokio::test]
async fn test_custom_catalog_and_saved_config() -> Result<()> {
    let products = vec![
        Product::new("Trail Running Shoes", 120.0)
            .with_id("trail")
            .with_brand("Salomon")
            .with_tags(["running", "trail"]),
        Product::new("Espresso Machine", 450.0)
            .with_id("espresso")
            .with_brand("Breville")
            .with_tags(["coffee", "kitchen"]),
    ];
    let catalog = TestCatalog::with_products(&products)?;

    assert!(Config::is_initialized(catalog.path()));

    let page = catalog.search.search(Query::new("expresso")).await?;
    assert_eq!(ids(&page.products), vec!["espresso"]);
    Ok(())
}
