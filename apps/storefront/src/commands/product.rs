//! # Product Commands
//!
//! Commands for listing and filtering the catalog.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  Search box / category dropdown / price slider change                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_products({ search: 'pro', category: 'All', maxPrice: 1500 })   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  Validate: query ≤ 100 chars,             │──► ValidationError      │
//! │  │            0 ≤ maxPrice ≤ slider ceiling  │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductFilter::matches on every listing, catalog order kept           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product>                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use std::time::Instant;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState};
use techstore_core::catalog::ProductFilter;
use techstore_core::validation::{validate_max_price, validate_search_query};
use techstore_core::{Money, Product, ProductId};

/// Filter controls from the product list page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Text typed in the search box.
    pub search: Option<String>,

    /// Selected category; "All" or `None` lists everything.
    pub category: Option<String>,

    /// Price slider position in whole dollars. Defaults to the ceiling.
    pub max_price: Option<i64>,
}

/// Lists products matching the filter controls.
///
/// ## Returns
/// Matching products in catalog order; an unknown category matches nothing.
pub fn search_products(
    catalog: &CatalogState,
    config: &ConfigState,
    request: &SearchRequest,
) -> Result<Vec<Product>, ApiError> {
    let start = Instant::now();
    debug!(?request, "search_products command");

    let mut filter = ProductFilter::default().with_max_price(config.max_price());

    if let Some(search) = &request.search {
        filter = filter.with_query(validate_search_query(search)?);
    }

    if let Some(category) = &request.category {
        filter = filter.with_category(category.trim());
    }

    if let Some(dollars) = request.max_price {
        validate_max_price(dollars, config.max_price_dollars)?;
        filter = filter.with_max_price(Money::from_dollars(dollars));
    }

    let products: Vec<Product> = catalog
        .inner()
        .search(&filter)
        .into_iter()
        .cloned()
        .collect();

    debug!(
        count = products.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "search_products done"
    );

    Ok(products)
}

/// Category dropdown options, "All" first.
pub fn list_categories(catalog: &CatalogState) -> Vec<String> {
    debug!("list_categories command");
    catalog.inner().categories()
}

/// Gets a single product by id.
pub fn get_product(catalog: &CatalogState, product_id: ProductId) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    Ok(catalog.inner().get(product_id)?.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn search(request: SearchRequest) -> Result<Vec<Product>, ApiError> {
        search_products(&CatalogState::default(), &ConfigState::default(), &request)
    }

    #[test]
    fn test_empty_request_lists_everything() {
        let products = search(SearchRequest::default()).unwrap();
        assert_eq!(products.len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = search(SearchRequest {
            search: Some("  pro ".to_string()),
            ..SearchRequest::default()
        })
        .unwrap();
        assert_eq!(
            names(&products),
            vec!["iPhone 15 Pro", "MacBook Pro", "AirPods Pro"]
        );
    }

    #[test]
    fn test_category_and_price() {
        let products = search(SearchRequest {
            category: Some("Phones".to_string()),
            max_price: Some(900),
            ..SearchRequest::default()
        })
        .unwrap();
        assert_eq!(names(&products), vec!["Samsung Galaxy S24"]);

        let products = search(SearchRequest {
            category: Some("All".to_string()),
            max_price: Some(999),
            ..SearchRequest::default()
        })
        .unwrap();
        assert_eq!(products.len(), 3);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let products = search(SearchRequest {
            category: Some("Electronics".to_string()),
            ..SearchRequest::default()
        })
        .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let err = search(SearchRequest {
            search: Some("x".repeat(101)),
            ..SearchRequest::default()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        for dollars in [-1, 2001] {
            let err = search(SearchRequest {
                max_price: Some(dollars),
                ..SearchRequest::default()
            })
            .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"search":"mac","maxPrice":1500}"#).unwrap();
        assert_eq!(request.search.as_deref(), Some("mac"));
        assert_eq!(request.category, None);
        assert_eq!(request.max_price, Some(1500));
    }

    #[test]
    fn test_list_categories_and_get_product() {
        let catalog = CatalogState::default();
        assert_eq!(
            list_categories(&catalog),
            vec!["All", "Phones", "Laptops", "Accessories"]
        );

        assert_eq!(get_product(&catalog, ProductId::new(3)).unwrap().name, "MacBook Pro");
        assert_eq!(
            get_product(&catalog, ProductId::new(0)).unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
