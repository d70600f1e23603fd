//! # Product Commands
//!
//! Catalog listing. Quantities stay private to the ledger.

use tracing::debug;

use fakeshop_core::CatalogEntry;

use crate::state::ShopState;

/// Lists every product without its remaining stock, sorted by SKU.
pub fn list_products(state: &ShopState) -> Vec<CatalogEntry> {
    let products = state.inventory.catalog();
    debug!(count = products.len(), "list_products command");
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;
    use fakeshop_core::ProductLine;

    #[test]
    fn test_list_products() {
        let state = ShopState::new(&ShopConfig::default());
        state
            .install_catalogs(
                vec![
                    ProductLine::new("B1234", "Stick", 0.1, 5),
                    ProductLine::new("A1234", "Carrot", 1.1, 10),
                ],
                Vec::new(),
            )
            .unwrap();

        let products = list_products(&state);
        assert_eq!(
            products,
            vec![
                CatalogEntry {
                    sku: "A1234".to_string(),
                    name: "Carrot".to_string(),
                    price: 1.1,
                },
                CatalogEntry {
                    sku: "B1234".to_string(),
                    name: "Stick".to_string(),
                    price: 0.1,
                },
            ]
        );
    }
}
