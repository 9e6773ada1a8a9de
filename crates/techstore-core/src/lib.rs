//! # techstore-core: Pure Business Logic for the TechStore storefront
//!
//! This crate holds everything about the storefront that can be expressed as
//! plain data and pure functions: money, catalog records, the cart reducer
//! and input validation. The client session that owns a cart and talks to
//! the UI lives in the `techstore-storefront` app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      TechStore Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 UI (web client / storefront shell)              │   │
//! │  │    Search ──► Product list ──► Add to cart ──► Cart view       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        apps/storefront (CartStore, SessionState, Config)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ techstore-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │  filter   │  │   │
//! │  │   │ LineItem  │  │           │  │  reducer  │  │ mock data │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, LineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart state and the pure transition function
//! - [`catalog`] - Mock product listings and search/filter
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use techstore_core::cart::{CartCommand, CartState};
//! use techstore_core::types::{LineItemInput, ProductId};
//! use techstore_core::Money;
//!
//! let cart = CartState::empty();
//! let keyboard = LineItemInput::new(ProductId::new(1), "Keyboard", Money::from_dollars(10), "x");
//!
//! let cart = cart.apply(&CartCommand::AddItem(keyboard.clone())).into_state(&cart);
//! let cart = cart.apply(&CartCommand::AddItem(keyboard)).into_state(&cart);
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total(), Money::from_dollars(20));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartCommand, CartState, Ignored, Transition};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category name that matches every product in the catalog filter.
pub const ALL_CATEGORIES: &str = "All";

/// Upper bound of the price-range slider, in whole dollars.
pub const DEFAULT_MAX_PRICE_DOLLARS: i64 = 2000;

/// Maximum length of a search query after trimming.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Keeps `price × quantity` far from the `i64` limits and catches a
/// mistyped quantity (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
