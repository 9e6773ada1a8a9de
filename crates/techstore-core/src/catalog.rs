//! # Catalog
//!
//! The storefront's in-memory product listings and the search/filter applied
//! to them. Nothing here reads or writes cart state.
//!
//! ## Filter Semantics
//! A product is listed when all three hold:
//! - its category equals the selected one (or the selection is "All")
//! - its price is at or below the price-range ceiling
//! - its name contains the search text, ignoring case

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::{ALL_CATEGORIES, DEFAULT_MAX_PRICE_DOLLARS};

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/300x200";

// =============================================================================
// Product Filter
// =============================================================================

/// Search and filter options from the product list controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against product names.
    pub query: String,

    /// Selected category. `None` lists every category.
    pub category: Option<String>,

    /// Price-range ceiling (inclusive).
    pub max_price: Money,
}

impl Default for ProductFilter {
    fn default() -> Self {
        ProductFilter {
            query: String::new(),
            category: None,
            max_price: Money::from_dollars(DEFAULT_MAX_PRICE_DOLLARS),
        }
    }
}

impl ProductFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Selects a category. "All" clears the selection.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (category != ALL_CATEGORIES).then_some(category);
        self
    }

    pub fn with_max_price(mut self, max_price: Money) -> Self {
        self.max_price = max_price;
        self
    }

    /// Whether `product` passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |category| product.category == category);

        category_ok
            && product.price <= self.max_price
            && product
                .name
                .to_lowercase()
                .contains(&self.query.to_lowercase())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A fixed list of products in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The demo listings the storefront ships with.
    pub fn mock() -> Self {
        let product = |id: u32, name: &str, dollars: i64, category: &str, description: &str, rating: f32| {
            Product {
                id: ProductId::new(id),
                name: name.to_string(),
                price: Money::from_dollars(dollars),
                category: category.to_string(),
                image: PLACEHOLDER_IMAGE.to_string(),
                description: description.to_string(),
                rating,
            }
        };

        Catalog::new(vec![
            product(1, "iPhone 15 Pro", 999, "Phones", "Latest iPhone with advanced features", 4.8),
            product(2, "Samsung Galaxy S24", 899, "Phones", "Flagship Android smartphone", 4.7),
            product(3, "MacBook Pro", 1299, "Laptops", "Powerful laptop for professionals", 4.9),
            product(4, "AirPods Pro", 249, "Accessories", "Premium wireless earbuds", 4.6),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or(CoreError::ProductNotFound(id))
    }

    /// Category options: "All" followed by each category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Products passing `filter`, in catalog order.
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
