//! # fakeshop-core: Inventory, Carts and Promotions
//!
//! The business logic of the fake shop. No network and no file access: the
//! shop server owns I/O and drives this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fakeshop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shop-server (axum)                           │   │
//! │  │    GET /products   POST /cart/items   PUT /cart   GET /cart     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fakeshop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │   cart    │  │ promotion │  │ registry  │  │   │
//! │  │   │  ledger   │◄─│  lines    │─►│  rules    │  │ id → cart │  │   │
//! │  │   │  claims   │  │ snapshot  │  │ catalog   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • ERRORS AS VALUES                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductLine, Promotion, etc.)
//! - [`inventory`] - The shared stock ledger
//! - [`promotion`] - Rule evaluation and the promotion catalog
//! - [`cart`] - One shopper's cart and its promo-claim cache
//! - [`registry`] - Cart lookup by id
//! - [`error`] - Domain error types
//! - [`validation`] - Adapter-side input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use fakeshop_core::{Cart, Inventory, ProductLine};
//! use chrono::Utc;
//!
//! let inventory = Inventory::new();
//! inventory
//!     .stock(vec![ProductLine::new("A1234", "Carrot", 1.1, 10)])
//!     .unwrap();
//!
//! let mut cart = Cart::new(Utc::now());
//! cart.add_line(&inventory, &ProductLine::request("A1234", 4)).unwrap();
//!
//! let snapshot = cart.snapshot(&inventory, &[]);
//! assert_eq!(snapshot.lines["A1234"].count, 4);
//! assert_eq!(inventory.available("A1234"), Some(6));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod promotion;
pub mod registry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSnapshot};
pub use error::{ClaimError, PromotionError, SnapshotError, StockError, ValidationError};
pub use inventory::Inventory;
pub use promotion::{Evaluation, PromotionCatalog};
pub use registry::{CartHandle, CartRegistry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default cart lifetime in seconds. Stored on each cart, never enforced.
pub const DEFAULT_CART_TTL_SECS: i64 = 600;

/// Maximum length of a SKU accepted from callers.
pub const MAX_SKU_LENGTH: usize = 50;

/// Maximum quantity of a single line accepted from callers.
pub const MAX_ITEM_QUANTITY: i64 = 999;
