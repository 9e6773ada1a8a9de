//! # State Module
//!
//! Session-scoped state for the storefront.
//!
//! ## Why Multiple State Types?
//! Instead of one global store, each concern gets its own type and every
//! command takes only the state it needs as an argument. Tests build exactly
//! the states they exercise.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (lib.rs)                          │   │
//! │  │  owns one of each, passes references into commands             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │      ┌───────────────┬───────┴───────┬────────────────┐                │
//! │      ▼               ▼               ▼                ▼                 │
//! │  ┌──────────┐  ┌────────────┐  ┌────────────┐  ┌────────────┐          │
//! │  │CartStore │  │CatalogState│  │SessionState│  │ConfigState │          │
//! │  │          │  │            │  │            │  │            │          │
//! │  │ Arc snap │  │ mock       │  │ RwLock<    │  │ read-only  │          │
//! │  │ + list-  │  │ products   │  │  Option<   │  │            │          │
//! │  │   eners  │  │            │  │   User>>   │  │            │          │
//! │  └──────────┘  └────────────┘  └────────────┘  └────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod session;

pub use cart::{CartListener, CartSnapshot, CartStore, Dispatched, Subscription};
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use session::{SessionState, SessionUser};
