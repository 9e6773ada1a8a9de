//! # Domain Types
//!
//! Core domain types shared by the catalog and the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  LineItemInput  │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │──►│  id             │       │
//! │  │  name, price    │   │  name, price    │   │  name, price    │       │
//! │  │  image          │   │  image          │   │  image          │       │
//! │  │  category       │   └─────────────────┘   │  quantity >= 1  │       │
//! │  │  description    │                         └─────────────────┘       │
//! │  │  rating         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` copies name, price and image out of the product at the
//! moment it is added, so the cart keeps displaying what the customer saw.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Identity
// =============================================================================

/// Identifier of a catalog product. Also the key of a cart line: a cart holds
/// at most one line per product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name shown in listings and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Category used by the category filter (e.g. "Phones").
    pub category: String,

    /// Image URL.
    pub image: String,

    pub description: String,

    /// Average review score, 0.0 to 5.0.
    pub rating: f32,
}

impl Product {
    /// Projects the subset of fields the cart needs.
    pub fn to_line_input(&self) -> LineItemInput {
        LineItemInput {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }

    /// Number of filled stars in the listing (rating rounded down).
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).floor() as u8
    }
}

// =============================================================================
// Line Item Input
// =============================================================================

/// Payload of an add-to-cart request. The quantity is implicitly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItemInput {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub image: String,
}

impl LineItemInput {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        LineItemInput {
            id,
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart together with its quantity.
///
/// ## Invariants
/// - `quantity >= 1`; a line that would drop below one is removed instead
/// - Only [`crate::cart::CartState`] constructs line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub image: String,
}

impl LineItem {
    pub(crate) fn from_input(input: &LineItemInput) -> Self {
        LineItem {
            id: input.id,
            name: input.name.clone(),
            price: input.price,
            quantity: 1,
            image: input.image.clone(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
