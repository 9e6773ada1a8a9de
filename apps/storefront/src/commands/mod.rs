//! # Storefront Commands
//!
//! Every operation the UI can trigger, as plain functions over the session
//! state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product listing, search, categories
//! ├── cart.rs     ◄─── Cart view and manipulation
//! ├── session.rs  ◄─── Sign in / sign out
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_categories(catalog: &CatalogState)
//!
//! // Cart view is gated on the session
//! fn get_cart(session: &SessionState, cart: &CartStore)
//!
//! // Needs both catalog and cart
//! fn add_to_cart(catalog: &CatalogState, cart: &CartStore, product_id: ProductId)
//! ```

pub mod cart;
pub mod config;
pub mod product;
pub mod session;
