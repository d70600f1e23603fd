//! # Fakeshop Server
//!
//! HTTP adapter over `fakeshop-core`.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shop Server Modules                             │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes        │  │  commands      │  │  state                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • axum Router  │─►│ • get_cart     │─►│ • Inventory                ││
//! │  │ • serve        │  │ • add_product  │  │ • PromotionCatalog         ││
//! │  │                │  │ • update_cart  │  │ • CartRegistry             ││
//! │  │                │  │ • list_products│  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                 ▲                       │
//! │  ┌────────────────┐  ┌────────────────┐         │ startup               │
//! │  │  config        │  │  catalog       │─────────┘                       │
//! │  │ • env vars     │  │ • stock.toml   │                                 │
//! │  │                │  │ • promotions   │                                 │
//! │  └────────────────┘  └────────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `FAKESHOP_PORT` - HTTP port (default: 8888; `PORT` is honoured when unset)
//! - `FAKESHOP_BIND` - Interface to bind (default: 0.0.0.0)
//! - `FAKESHOP_STOCK_FILE` - Inventory catalog (default: config/stock.toml)
//! - `FAKESHOP_PROMOTIONS_FILE` - Promotion catalog (default: config/promotions.toml)
//! - `FAKESHOP_CART_TTL_SECS` - Lifetime stamped on new carts (default: 600)

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports
pub use catalog::CatalogError;
pub use config::{ConfigError, ShopConfig};
pub use error::{ApiError, ErrorCode};
pub use state::{SharedState, ShopState};
