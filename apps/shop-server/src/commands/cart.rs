//! # Cart Commands
//!
//! Cart retrieval and mutation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────────────┐            │
//! │  │  No id   │────►│  Empty   │────►│  Lines claimed from  │            │
//! │  │  given   │     │  cart    │     │  the inventory       │            │
//! │  └──────────┘     └──────────┘     └──────────────────────┘            │
//! │                        ▲                 │        ▲                     │
//! │                   get_cart          add_product   │                     │
//! │                   (creates)         update_cart ──┘                     │
//! │                                                                         │
//! │  Every command answers with a fresh snapshot: promotions re-evaluated, │
//! │  bonus stock topped up.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use fakeshop_core::validation::{validate_cart_id, validate_count, validate_quantity, validate_sku};
use fakeshop_core::{CartHandle, CartSnapshot, ProductLine};

use crate::error::ApiError;
use crate::state::ShopState;

/// A SKU and a quantity, as submitted by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRequest {
    pub sku: String,
    pub count: i64,
}

/// Adds `item.count` more units to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddProductRequest {
    #[serde(default)]
    pub cart_id: Option<String>,
    pub item: LineRequest,
}

/// Sets each listed SKU to the given total quantity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCartRequest {
    #[serde(default)]
    pub cart_id: Option<String>,
    pub products: Vec<LineRequest>,
}

/// Cart as returned to callers.
///
/// Items are in SKU order. `errors` is `null` when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    pub id: String,
    pub added_items: Vec<ProductLine>,
    pub promotion_items: Vec<ProductLine>,
    pub total_price: f64,
    pub errors: Option<Vec<String>>,
}

impl CartView {
    /// Builds the view, placing `leading` errors before the snapshot's own.
    fn build(id: Uuid, snapshot: CartSnapshot, leading: Vec<String>) -> Self {
        let total_price = snapshot.total();
        let mut errors = leading;
        errors.extend(snapshot.errors.into_iter().flatten().map(|e| e.to_string()));

        CartView {
            id: id.to_string(),
            added_items: snapshot.lines.into_values().collect(),
            promotion_items: snapshot.promotions.into_values().collect(),
            total_price,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }
}

/// Returns a cart, creating it when the id is absent or not yet known.
pub fn get_cart(state: &ShopState, cart_id: Option<&str>) -> Result<CartView, ApiError> {
    debug!(?cart_id, "get_cart command");
    let (id, cart) = resolve_cart(state, cart_id)?;
    Ok(render(state, id, &cart, Vec::new()))
}

/// Claims more of one product for a cart.
///
/// A claim failure fails the call; any units that were partially claimed
/// stay in the cart and show up on the next read.
pub fn add_product(state: &ShopState, request: AddProductRequest) -> Result<CartView, ApiError> {
    debug!(cart_id = ?request.cart_id, sku = %request.item.sku, count = request.item.count, "add_product command");

    validate_sku(&request.item.sku)?;
    validate_quantity(request.item.count)?;
    let (id, cart) = resolve_cart(state, request.cart_id.as_deref())?;

    cart.add_line(
        &state.inventory,
        &ProductLine::request(request.item.sku.trim(), request.item.count),
    )?;

    Ok(render(state, id, &cart, Vec::new()))
}

/// Replaces line quantities in a cart.
///
/// Failing lines do not stop the others; their errors come first in the
/// returned view.
pub fn update_cart(state: &ShopState, request: UpdateCartRequest) -> Result<CartView, ApiError> {
    debug!(cart_id = ?request.cart_id, lines = request.products.len(), "update_cart command");

    let mut lines = Vec::with_capacity(request.products.len());
    for product in &request.products {
        validate_sku(&product.sku)?;
        validate_count(product.count)?;
        lines.push(ProductLine::request(product.sku.trim(), product.count));
    }
    let (id, cart) = resolve_cart(state, request.cart_id.as_deref())?;

    let replace_errors = cart
        .replace(&state.inventory, &lines)
        .into_iter()
        .map(|e| e.to_string())
        .collect();

    Ok(render(state, id, &cart, replace_errors))
}

fn resolve_cart(state: &ShopState, cart_id: Option<&str>) -> Result<(Uuid, CartHandle), ApiError> {
    let id = cart_id.map(validate_cart_id).transpose()?;
    Ok(state.carts.retrieve_or_create(id))
}

fn render(state: &ShopState, id: Uuid, cart: &CartHandle, leading: Vec<String>) -> CartView {
    let rules = state.promotions.rules();
    CartView::build(id, cart.snapshot(&state.inventory, &rules), leading)
}
