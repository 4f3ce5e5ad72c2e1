use anyhow::{anyhow, Result};
use std::env;

use crate::catalog::{Product, ProductFilter, Sort, SortKey, SortOrder};
use crate::cli::SearchArgs;
use crate::search::Query;
use crate::Config;

/// Run the search command
///
/// Loads the configured catalog, runs one hybrid search and prints the page.
pub async fn run(args: SearchArgs) -> Result<()> {
    let root = env::current_dir()?;
    let config = Config::load(&root)?;

    let query = build_query(&args, &config)?;
    let search = super::build_search(&config, &root, args.catalog.clone())?;
    let page = search.search(query).await?;

    if page.products.is_empty() {
        println!("No products found for: {}", args.term);
        return Ok(());
    }

    println!(
        "Page {}/{} ({} matching) for: \"{}\"\n",
        page.current_page, page.total_pages, page.total_items, args.term
    );

    let offset = (page.current_page - 1) * page.page_size;
    for (i, product) in page.products.iter().enumerate() {
        println!("{:>3}. {}", offset + i + 1, format_product(product));
    }

    if page.has_more {
        println!("\nMore results: --page {}", page.current_page + 1);
    }

    Ok(())
}

fn build_query(args: &SearchArgs, config: &Config) -> Result<Query> {
    let key: SortKey = args.sort_by.parse().map_err(|e: String| anyhow!(e))?;
    let order: SortOrder = args.sort_order.parse().map_err(|e: String| anyhow!(e))?;

    let filter = ProductFilter {
        category: args.category.clone(),
        brand: args.brand.clone(),
        min_price: args.min_price,
        max_price: args.max_price,
        min_rating: args.min_rating,
        is_on_sale: args.on_sale.then_some(true),
        is_featured: args.featured.then_some(true),
        min_views: args.min_views,
    };

    Ok(Query::new(args.term.clone())
        .with_filter(filter)
        .with_sort(Sort::new(key, order))
        .with_page(args.page)
        .with_page_size(args.limit.unwrap_or(config.search.default_limit))
        .with_fuzzy_threshold(args.threshold.unwrap_or(config.search.fuzzy_threshold)))
}

/// One-line summary of a product for terminal output
fn format_product(product: &Product) -> String {
    let brand = product
        .brand
        .as_deref()
        .map(|b| format!(" [{}]", b))
        .unwrap_or_default();
    let sale = if product.is_on_sale { " (sale)" } else { "" };

    format!(
        "{}{} - ${:.2}{} - rating {:.1} ({})",
        product.name, brand, product.price, sale, product.rating, product.id
    )
}
