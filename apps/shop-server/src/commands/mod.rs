//! # Shop Commands Module
//!
//! The operations the HTTP layer exposes, independent of axum.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Catalog listing
//! └── cart.rs     ◄─── Cart retrieval and mutation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  PUT /cart  { "cartId": "…", "products": [{ "sku": "A1234",            │
//! │                                             "count": 3 }] }            │
//! │         │                                                               │
//! │         │ (axum Json extractor)                                         │
//! │         ▼                                                               │
//! │  fn update_cart(                                                        │
//! │      state: &ShopState,        ◄── From the router's shared state       │
//! │      request: UpdateCartRequest,                                        │
//! │  ) -> Result<CartView, ApiError>                                        │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  { "id": "…", "addedItems": [...], "promotionItems": [...],            │
//! │    "totalPrice": 3.3, "errors": null }                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are synchronous: every lock they take is held for one in-memory
//! operation.

pub mod cart;
pub mod product;

pub use cart::{add_product, get_cart, update_cart, AddProductRequest, CartView, LineRequest, UpdateCartRequest};
pub use product::list_products;
