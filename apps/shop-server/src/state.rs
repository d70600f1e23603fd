//! # Shop State
//!
//! Everything a request handler needs, shared across the router via `Arc`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  Inventory   │  │ PromotionCatalog │  │   CartRegistry   │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Mutex<map>  │  │ RwLock<Arc<Vec>> │  │  Mutex<map> of   │          │
//! │  │  one claim   │  │ swapped whole    │  │  Arc<Mutex<Cart>>│          │
//! │  │  at a time   │  │ on register      │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use fakeshop_core::{CartRegistry, Inventory, ProductLine, Promotion, PromotionCatalog, StockError};

use crate::config::ShopConfig;

/// Shared application state.
#[derive(Debug)]
pub struct ShopState {
    pub inventory: Inventory,
    pub promotions: PromotionCatalog,
    pub carts: CartRegistry,
}

/// What axum handlers receive.
pub type SharedState = Arc<ShopState>;

impl ShopState {
    /// Empty inventory, no rules, no carts.
    pub fn new(config: &ShopConfig) -> Self {
        ShopState {
            inventory: Inventory::new(),
            promotions: PromotionCatalog::new(),
            carts: CartRegistry::new(config.cart_ttl()),
        }
    }

    /// Stocks the inventory and registers the promotion rules.
    ///
    /// Rules are only registered once stocking succeeded.
    pub fn install_catalogs(
        &self,
        products: Vec<ProductLine>,
        promotions: Vec<Promotion>,
    ) -> Result<(), StockError> {
        self.inventory.stock(products)?;
        let rules = promotions.len();
        self.promotions.register(promotions);
        info!(rules, "Promotions registered");
        Ok(())
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
