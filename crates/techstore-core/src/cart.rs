//! # Cart State
//!
//! The cart as an immutable value plus the pure transition function that
//! produces the next value.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Command                    Condition              Result               │
//! │  ───────                    ─────────              ──────               │
//! │                                                                         │
//! │  AddItem(input) ──────────► id absent ───────────► append, qty 1       │
//! │                 ├─────────► qty at 999 ──────────► Ignored             │
//! │                 └─────────► id present ──────────► qty += 1 in place   │
//! │                                                                         │
//! │  UpdateQuantity(id, n) ───► n < 1 ───────────────► Ignored             │
//! │                       ├───► n > 999 ─────────────► Ignored             │
//! │                       ├───► id absent ───────────► Ignored             │
//! │                       └───► otherwise ───────────► qty = n             │
//! │                                                                         │
//! │  RemoveItem(id) ──────────► id absent ───────────► Ignored             │
//! │                 └─────────► id present ──────────► line removed        │
//! │                                                                         │
//! │  Every Applied result recomputes `total` from the items.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply` never mutates `self`; callers swap the returned state in as a
//! whole, so a snapshot that has been handed out stays valid forever.

use serde::Serialize;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{LineItem, LineItemInput, ProductId};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Commands
// =============================================================================

/// A request to change the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product.
    AddItem(LineItemInput),

    /// Set the quantity of an existing line.
    UpdateQuantity { id: ProductId, quantity: i64 },

    /// Drop a line entirely.
    RemoveItem(ProductId),
}

impl CartCommand {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddItem(_) => "add_item",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::RemoveItem(_) => "remove_item",
        }
    }

    /// The product the command targets.
    pub fn product_id(&self) -> ProductId {
        match self {
            CartCommand::AddItem(input) => input.id,
            CartCommand::UpdateQuantity { id, .. } => *id,
            CartCommand::RemoveItem(id) => *id,
        }
    }
}

// =============================================================================
// Transition Outcome
// =============================================================================

/// Why a command left the cart unchanged.
///
/// These are policy outcomes, not errors: the UI never shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// `UpdateQuantity` with a quantity below one. Removal goes through
    /// `RemoveItem`.
    QuantityBelowOne { id: ProductId, requested: i64 },

    /// A line would go past [`MAX_ITEM_QUANTITY`], through `UpdateQuantity`
    /// or by adding to a full line.
    QuantityAboveMax { id: ProductId, requested: i64 },

    /// The command names a product that has no line in the cart.
    NotInCart(ProductId),
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::QuantityBelowOne { id, requested } => {
                write!(f, "quantity {} for product {} is below 1", requested, id)
            }
            Ignored::QuantityAboveMax { id, requested } => write!(
                f,
                "quantity {} for product {} is above {}",
                requested, id, MAX_ITEM_QUANTITY
            ),
            Ignored::NotInCart(id) => write!(f, "product {} is not in the cart", id),
        }
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The command produced a new state.
    Applied(CartState),

    /// The command was a no-op.
    Ignored(Ignored),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    /// The state after the transition: the new one, or a copy of `previous`
    /// when the command was ignored.
    pub fn into_state(self, previous: &CartState) -> CartState {
        match self {
            Transition::Applied(state) => state,
            Transition::Ignored(_) => previous.clone(),
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Snapshot of the cart: line items in insertion order plus their total.
///
/// ## Invariants
/// - `total == Σ price × quantity` over `items`
/// - Product ids are unique across `items`
/// - Every `1 <= quantity <= MAX_ITEM_QUANTITY`
///
/// Fields are private so the invariants can only be reached through
/// [`CartState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    items: Vec<LineItem>,
    total: Money,
}

impl CartState {
    /// The empty cart every session starts with.
    pub fn empty() -> Self {
        CartState::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Line for `id`, if the product is in the cart.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities (the navbar badge).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies one command and returns the outcome.
    ///
    /// ## Example
    /// ```rust
    /// use techstore_core::cart::{CartCommand, CartState, Ignored, Transition};
    /// use techstore_core::ProductId;
    ///
    /// let cart = CartState::empty();
    /// let outcome = cart.apply(&CartCommand::RemoveItem(ProductId::new(7)));
    /// assert_eq!(outcome, Transition::Ignored(Ignored::NotInCart(ProductId::new(7))));
    /// ```
    pub fn apply(&self, command: &CartCommand) -> Transition {
        match command {
            CartCommand::AddItem(input) => self.with_added(input),
            CartCommand::UpdateQuantity { id, quantity } => {
                if *quantity < 1 {
                    return Transition::Ignored(Ignored::QuantityBelowOne {
                        id: *id,
                        requested: *quantity,
                    });
                }
                if *quantity > MAX_ITEM_QUANTITY {
                    return Transition::Ignored(Ignored::QuantityAboveMax {
                        id: *id,
                        requested: *quantity,
                    });
                }
                match self.position(*id) {
                    Some(index) => {
                        let mut items = self.items.clone();
                        items[index].quantity = *quantity;
                        Transition::Applied(CartState::from_items(items))
                    }
                    None => Transition::Ignored(Ignored::NotInCart(*id)),
                }
            }
            CartCommand::RemoveItem(id) => match self.position(*id) {
                Some(index) => {
                    let mut items = self.items.clone();
                    items.remove(index);
                    Transition::Applied(CartState::from_items(items))
                }
                None => Transition::Ignored(Ignored::NotInCart(*id)),
            },
        }
    }

    fn with_added(&self, input: &LineItemInput) -> Transition {
        let mut items = self.items.clone();
        match self.position(input.id) {
            Some(index) if items[index].quantity >= MAX_ITEM_QUANTITY => {
                return Transition::Ignored(Ignored::QuantityAboveMax {
                    id: input.id,
                    requested: items[index].quantity.saturating_add(1),
                });
            }
            Some(index) => items[index].quantity += 1,
            None => items.push(LineItem::from_input(input)),
        }
        Transition::Applied(CartState::from_items(items))
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Builds a state from items, deriving the total.
    fn from_items(items: Vec<LineItem>) -> Self {
        let total = items.iter().map(LineItem::line_total).sum();
        CartState { items, total }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
