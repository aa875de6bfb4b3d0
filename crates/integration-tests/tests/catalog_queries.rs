//! Integration tests for the catalog query flows.
//!
//! Exercises category and product CRUD plus the paginated, sorted, filtered
//! queries the way an embedding transport layer would.

use std::sync::Arc;

use rust_decimal::Decimal;

use tamarind_catalog::payload::ProductDraft;
use tamarind_catalog::{CatalogError, PageRequest, SortDirection};
use tamarind_core::{CategoryId, DiscountPercent};
use tamarind_integration_tests::TestContext;

fn draft(name: &str, price: i64, discount: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        description: format!("{name} description"),
        quantity: 10,
        price: Decimal::from(price),
        discount: DiscountPercent::new(Decimal::from(discount)).expect("valid discount"),
    }
}

fn sorted_by(field: &str, page: u32, size: u32) -> PageRequest {
    PageRequest::new(page, size, field, SortDirection::Ascending)
}

// =============================================================================
// Category Flows
// =============================================================================

#[tokio::test]
async fn test_category_lifecycle() {
    let ctx = TestContext::new();

    let created = ctx.categories.create("Electronics").await.expect("create");
    ctx.categories.create("Books").await.expect("create");

    let page = ctx.categories.list(&sorted_by("name", 0, 10)).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Books", "Electronics"]);

    let renamed = ctx
        .categories
        .update(created.id, "Gadgets")
        .await
        .expect("update");
    assert_eq!(renamed.name, "Gadgets");

    let deleted = ctx.categories.delete(created.id).await.expect("delete");
    assert_eq!(deleted.name, "Gadgets");
}

#[tokio::test]
async fn test_category_listing_with_no_categories_is_a_business_error() {
    let ctx = TestContext::new();
    let result = ctx.categories.list(&sorted_by("name", 0, 10)).await;
    assert!(matches!(result, Err(CatalogError::EmptyResult(_))));
}

#[tokio::test]
async fn test_category_pagination_metadata() {
    let ctx = TestContext::new();
    for name in ["A", "B", "C", "D", "E"] {
        ctx.categories.create(name).await.expect("create");
    }

    let page = ctx.categories.list(&sorted_by("name", 1, 2)).await.expect("list");
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert!(!page.last);

    // A page past the end still reports correct totals.
    let past = ctx.categories.list(&sorted_by("name", 9, 2)).await.expect("list");
    assert!(past.items.is_empty());
    assert_eq!(past.total_pages, 3);
    assert!(past.last);
}

#[tokio::test]
async fn test_duplicate_category_name_conflicts() {
    let ctx = TestContext::new();
    ctx.categories.create("Electronics").await.expect("create");
    let result = ctx.categories.create("Electronics").await;
    assert!(matches!(result, Err(CatalogError::Conflict(_))));
}

#[tokio::test]
async fn test_concurrent_creates_for_one_name_yield_exactly_one_winner() {
    let ctx = Arc::new(TestContext::new());

    let first = tokio::spawn({
        let ctx = ctx.clone();
        async move { ctx.categories.create("Electronics").await }
    });
    let second = tokio::spawn({
        let ctx = ctx.clone();
        async move { ctx.categories.create("Electronics").await }
    });

    let results = [
        first.await.expect("join"),
        second.await.expect("join"),
    ];
    let winners = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(
        results
            .iter()
            .any(|result| matches!(result, Err(CatalogError::Conflict(_))))
    );
}

// =============================================================================
// Product Flows
// =============================================================================

#[tokio::test]
async fn test_product_listing_is_empty_page_when_catalog_is_empty() {
    // Unlike categories, an empty product catalog lists as an empty page.
    let ctx = TestContext::new();
    let page = ctx.products.list(&sorted_by("name", 0, 10)).await.expect("list");
    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 0);
    assert!(page.last);
}

#[tokio::test]
async fn test_products_sort_descending_by_price() {
    let ctx = TestContext::new();
    let category = ctx.categories.create("Electronics").await.expect("create");
    ctx.products
        .add_product(category.id, draft("Cable", 10, 0))
        .await
        .expect("add");
    ctx.products
        .add_product(category.id, draft("Laptop", 2000, 0))
        .await
        .expect("add");
    ctx.products
        .add_product(category.id, draft("Phone", 1000, 0))
        .await
        .expect("add");

    let request = PageRequest::new(0, 10, "price", SortDirection::Descending);
    let page = ctx.products.list(&request).await.expect("list");
    let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Phone", "Cable"]);
}

#[tokio::test]
async fn test_search_by_category_defaults_to_cheapest_first() {
    let ctx = TestContext::new();
    let category = ctx.categories.create("Electronics").await.expect("create");
    ctx.products
        .add_product(category.id, draft("Laptop", 2000, 0))
        .await
        .expect("add");
    ctx.products
        .add_product(category.id, draft("Cable", 10, 0))
        .await
        .expect("add");
    ctx.products
        .add_product(category.id, draft("Phone", 1000, 0))
        .await
        .expect("add");

    // Every product has the same discount, so sorting by it leaves the
    // query-level price order as the tie-break.
    let page = ctx
        .products
        .search_by_category(category.id, &sorted_by("discount", 0, 10))
        .await
        .expect("search");
    let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Cable", "Phone", "Laptop"]);
}

#[tokio::test]
async fn test_search_by_category_errors() {
    let ctx = TestContext::new();
    let result = ctx
        .products
        .search_by_category(CategoryId::new(40), &sorted_by("name", 0, 10))
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound { .. })));

    let empty = ctx.categories.create("Empty Shelf").await.expect("create");
    let result = ctx
        .products
        .search_by_category(empty.id, &sorted_by("name", 0, 10))
        .await;
    assert!(matches!(result, Err(CatalogError::EmptyResult(_))));
}

#[tokio::test]
async fn test_search_by_keyword_is_case_insensitive() {
    let ctx = TestContext::new();
    let category = ctx.categories.create("Electronics").await.expect("create");
    ctx.products
        .add_product(category.id, draft("Phone Case", 15, 0))
        .await
        .expect("add");

    let page = ctx
        .products
        .search_by_keyword("PHONE", &sorted_by("name", 0, 10))
        .await
        .expect("search");
    assert_eq!(page.items.len(), 1);

    let result = ctx
        .products
        .search_by_keyword("xyz", &sorted_by("name", 0, 10))
        .await;
    assert!(matches!(result, Err(CatalogError::EmptyResult(_))));
}

#[tokio::test]
async fn test_same_product_name_allowed_across_categories() {
    let ctx = TestContext::new();
    let electronics = ctx.categories.create("Electronics").await.expect("create");
    let books = ctx.categories.create("Books").await.expect("create");

    ctx.products
        .add_product(electronics.id, draft("Phone", 1000, 10))
        .await
        .expect("add");
    ctx.products
        .add_product(books.id, draft("Phone", 25, 0))
        .await
        .expect("add to another category");

    let result = ctx
        .products
        .add_product(electronics.id, draft("Phone", 900, 0))
        .await;
    assert!(matches!(result, Err(CatalogError::Conflict(_))));
}

#[tokio::test]
async fn test_unknown_sort_field_is_invalid_argument() {
    let ctx = TestContext::new();
    ctx.categories.create("Electronics").await.expect("create");

    let result = ctx.categories.list(&sorted_by("flavor", 0, 10)).await;
    assert!(matches!(result, Err(CatalogError::InvalidArgument(_))));
}
