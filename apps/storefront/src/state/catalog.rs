//! # Catalog State
//!
//! Wraps the product catalog for the session. The listings are mock data and
//! never change after startup, so no lock is needed.

use techstore_core::catalog::Catalog;

/// Read-only product catalog shared by the product and cart commands.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState { catalog }
    }

    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for CatalogState {
    /// The built-in demo listings.
    fn default() -> Self {
        Self::new(Catalog::mock())
    }
}
