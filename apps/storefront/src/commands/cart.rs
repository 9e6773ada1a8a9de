//! # Cart Commands
//!
//! Commands for viewing and manipulating the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart  ┌──────────┐                               │
//! │  │  Empty   │──────────────►│ In Cart  │◄──┐ add_to_cart (qty + 1)     │
//! │  │  Cart    │               │          │───┘ update / inc / dec        │
//! │  └──────────┘               └──────────┘                               │
//! │       ▲                          │                                      │
//! │       └──── remove_from_cart ────┘ (last line removed)                 │
//! │                                                                         │
//! │  Quantities below 1 and ids not in the cart are ignored: the cart is   │
//! │  returned unchanged and no listener fires.                              │
//! │  Quantities above 999 are a VALIDATION_ERROR.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartStore, CatalogState, Dispatched, SessionState};
use techstore_core::validation::{quantity_out_of_range, validate_quantity};
use techstore_core::{CartState, Ignored, LineItem, Money, ProductId};

/// Cart response including items and derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub total: Money,
    /// Sum of quantities; the header badge.
    pub total_quantity: i64,
    /// Number of distinct lines.
    pub item_count: usize,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            total: cart.total(),
            total_quantity: cart.total_quantity(),
            item_count: cart.item_count(),
        }
    }
}

impl From<&Dispatched> for CartResponse {
    fn from(dispatched: &Dispatched) -> Self {
        CartResponse::from(dispatched.snapshot().as_ref())
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart page (signed-in shoppers only)                                   │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Shopping Cart                                                 │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  iPhone 15 Pro           [-] 2 [+]          $1998.00   [🗑]     │    │
/// │  │  AirPods Pro             [-] 1 [+]           $249.00   [🗑]     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Total                                      $2247.00           │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  Signed out: UNAUTHORIZED, the UI redirects to the sign-in form        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(session: &SessionState, cart: &CartStore) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");

    if !session.is_signed_in() {
        return Err(ApiError::unauthorized("Sign in to view your cart"));
    }

    Ok(CartResponse::from(cart.read().as_ref()))
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one
/// - If product not in cart: appended as a new line with quantity 1
/// - Name, price and image are copied from the catalog at this moment
///
/// Adding does not require a signed-in user. A line already at the
/// quantity cap is a validation error.
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartStore,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog.inner().get(product_id)?;
    respond(cart.add_item(product.to_line_input()))
}

/// Sets the quantity of a line already in the cart.
///
/// ## Behavior
/// - Quantity below 1: ignored (use [`remove_from_cart`] to delete a line)
/// - Product not in cart: ignored
/// - Quantity above 999: validation error, cart untouched
pub fn update_cart_item(
    cart: &CartStore,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    validate_quantity(quantity)?;
    respond(cart.update_quantity(product_id, quantity))
}

/// The `+` button: current quantity plus one. Stepping past the cap is a
/// validation error.
pub fn increment_cart_item(
    cart: &CartStore,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increment_cart_item command");
    respond(cart.step_quantity(product_id, 1))
}

/// The `-` button: current quantity minus one.
///
/// At quantity 1 the request becomes 0 and is ignored, so the line stays.
pub fn decrement_cart_item(cart: &CartStore, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "decrement_cart_item command");
    CartResponse::from(&cart.step_quantity(product_id, -1))
}

/// Removes a line from the cart. Unknown ids are ignored.
pub fn remove_from_cart(cart: &CartStore, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    CartResponse::from(&cart.remove_item(product_id))
}

// The cap surfaces as an error; every other ignored outcome returns the cart.
fn respond(dispatched: Dispatched) -> Result<CartResponse, ApiError> {
    if let Dispatched::Ignored {
        reason: Ignored::QuantityAboveMax { .. },
        ..
    } = dispatched
    {
        return Err(quantity_out_of_range().into());
    }

    Ok(CartResponse::from(&dispatched))
}
