//! # Inventory Ledger
//!
//! The authoritative stock counts. The only place global availability is
//! decremented.
//!
//! ## Thread Safety
//! One `Mutex` guards the whole SKU map. Check-and-decrement happens under
//! that single lock, so two claims racing for the last unit cannot both win.
//!
//! ## Claim Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         claim(request)                                  │
//! │                                                                         │
//! │  SKU unknown ─────────────► Err(UnknownSku)          no state change    │
//! │                                                                         │
//! │  available >= count ──────► Ok(catalog line × count) stock -= count     │
//! │                                                                         │
//! │  available <  count ──────► Err(InsufficientStock {  stock = 0          │
//! │                               claimed: catalog line × available })      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no release operation: stock only ever goes down.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{ClaimError, StockError};
use crate::types::{CatalogEntry, ProductLine};

/// Shared stock ledger keyed by SKU.
#[derive(Debug, Default)]
pub struct Inventory {
    stock: Mutex<HashMap<String, ProductLine>>,
}

impl Inventory {
    /// Creates an empty ledger. Every claim fails until it is stocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire inventory with `items`.
    ///
    /// The new map is validated before it is installed, so a duplicate SKU
    /// or a negative count leaves the current inventory exactly as it was.
    pub fn stock(&self, items: Vec<ProductLine>) -> Result<(), StockError> {
        let mut next = HashMap::with_capacity(items.len());
        for item in items {
            if item.count < 0 {
                return Err(StockError::NegativeStock {
                    sku: item.sku,
                    count: item.count,
                });
            }
            match next.entry(item.sku.clone()) {
                Entry::Occupied(_) => {
                    return Err(StockError::DuplicateSku { sku: item.sku });
                }
                Entry::Vacant(slot) => {
                    slot.insert(item);
                }
            }
        }

        let products = next.len();
        *self.lock() = next;
        info!(products, "Inventory stocked");
        Ok(())
    }

    /// Reserves `request.count` units of `request.sku`.
    ///
    /// The returned line always carries the catalog name and price, never the
    /// caller's. On `InsufficientStock` the error holds the quantity that was
    /// actually reserved; callers decide whether to keep it.
    pub fn claim(&self, request: &ProductLine) -> Result<ProductLine, ClaimError> {
        if request.count < 0 {
            return Err(ClaimError::NegativeCount {
                sku: request.sku.clone(),
                count: request.count,
            });
        }

        let mut stock = self.lock();
        let product = stock
            .get_mut(&request.sku)
            .ok_or_else(|| ClaimError::UnknownSku {
                sku: request.sku.clone(),
            })?;

        if product.count >= request.count {
            product.count -= request.count;
            debug!(
                sku = %request.sku,
                claimed = request.count,
                remaining = product.count,
                "Stock claimed"
            );
            return Ok(product.with_count(request.count));
        }

        let obtained = product.count;
        product.count = 0;
        warn!(
            sku = %request.sku,
            requested = request.count,
            claimed = obtained,
            "Partial claim, stock exhausted"
        );
        Err(ClaimError::InsufficientStock {
            requested: request.count,
            claimed: product.with_count(obtained),
        })
    }

    /// Remaining stock for one SKU.
    pub fn available(&self, sku: &str) -> Option<i64> {
        self.lock().get(sku).map(|p| p.count)
    }

    /// Owned copy of the current stock map.
    pub fn snapshot(&self) -> HashMap<String, ProductLine> {
        self.lock().clone()
    }

    /// Products without quantities, sorted by SKU.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self.lock().values().map(CatalogEntry::from).collect();
        entries.sort_by(|a, b| a.sku.cmp(&b.sku));
        entries
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ProductLine>> {
        self.stock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    fn stocked() -> Inventory {
        let inventory = Inventory::new();
        inventory
            .stock(vec![
                ProductLine::new("A1234", "Carrot", 1.1, 10),
                ProductLine::new("B1234", "Stick", 0.1, 5),
            ])
            .unwrap();
        inventory
    }

    #[test]
    fn test_stock_and_snapshot() {
        let inventory = stocked();
        let snapshot = inventory.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["A1234"], ProductLine::new("A1234", "Carrot", 1.1, 10));
        assert_eq!(snapshot["B1234"], ProductLine::new("B1234", "Stick", 0.1, 5));
    }

    #[test]
    fn test_duplicate_sku_rejected_and_previous_inventory_kept() {
        let inventory = stocked();
        let err = inventory
            .stock(vec![
                ProductLine::new("X", "One", 1.0, 1),
                ProductLine::new("X", "Two", 2.0, 2),
            ])
            .unwrap_err();

        assert_eq!(err, StockError::DuplicateSku { sku: "X".to_string() });
        assert_eq!(inventory.available("X"), None);
        assert_eq!(inventory.available("A1234"), Some(10));
    }

    #[test]
    fn test_negative_stock_rejected_and_previous_inventory_kept() {
        let inventory = stocked();
        let err = inventory
            .stock(vec![
                ProductLine::new("C1234", "Fine", 1.0, 3),
                ProductLine::new("N", "Neg", 1.0, -5),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            StockError::NegativeStock {
                sku: "N".to_string(),
                count: -5
            }
        );
        assert_eq!(inventory.available("N"), None);
        assert_eq!(inventory.available("C1234"), None);
        assert_eq!(inventory.available("A1234"), Some(10));
    }

    #[test]
    fn test_claim_uses_catalog_name_and_price() {
        let inventory = stocked();
        let claimed = inventory
            .claim(&ProductLine::new("A1234", "Not a carrot", 99.0, 5))
            .unwrap();

        assert_eq!(claimed, ProductLine::new("A1234", "Carrot", 1.1, 5));
        assert_eq!(inventory.available("A1234"), Some(5));
    }

    #[test]
    fn test_partial_claim_drains_stock() {
        let inventory = stocked();
        let err = inventory.claim(&ProductLine::request("B1234", 8)).unwrap_err();

        match err {
            ClaimError::InsufficientStock { requested, claimed } => {
                assert_eq!(requested, 8);
                assert_eq!(claimed, ProductLine::new("B1234", "Stick", 0.1, 5));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(inventory.available("B1234"), Some(0));
    }

    #[test]
    fn test_unknown_sku_changes_nothing() {
        let inventory = stocked();
        let before = inventory.snapshot();
        let err = inventory.claim(&ProductLine::request("NOPE", 1)).unwrap_err();

        assert!(matches!(err, ClaimError::UnknownSku { .. }));
        assert_eq!(inventory.snapshot(), before);
    }

    #[test]
    fn test_negative_claim_rejected() {
        let inventory = stocked();
        let err = inventory.claim(&ProductLine::request("A1234", -3)).unwrap_err();

        assert!(matches!(err, ClaimError::NegativeCount { count: -3, .. }));
        assert_eq!(inventory.available("A1234"), Some(10));
    }

    #[test]
    fn test_catalog_hides_quantities_and_is_sorted() {
        let inventory = stocked();
        let catalog = inventory.catalog();
        let skus: Vec<&str> = catalog.iter().map(|e| e.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1234", "B1234"]);
        assert_eq!(catalog[0].name, "Carrot");
    }

    #[test]
    fn test_concurrent_claims_never_oversell() {
        let inventory = Arc::new(Inventory::new());
        inventory
            .stock(vec![ProductLine::new("HOT", "Hot item", 5.0, 50)])
            .unwrap();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let inventory = Arc::clone(&inventory);
                thread::spawn(move || {
                    let mut obtained = 0;
                    for _ in 0..20 {
                        match inventory.claim(&ProductLine::request("HOT", 1)) {
                            Ok(line) => obtained += line.count,
                            Err(e) => obtained += e.partial().map(|p| p.count).unwrap_or(0),
                        }
                    }
                    obtained
                })
            })
            .collect();

        let total: i64 = workers.into_iter().map(|w| w.join().unwrap()).sum();
        assert_eq!(total, 50);
        assert_eq!(inventory.available("HOT"), Some(0));
    }

    proptest! {
        #[test]
        fn prop_claims_never_exceed_initial_stock(
            initial in 0i64..100,
            requests in proptest::collection::vec(0i64..20, 0..40),
        ) {
            let inventory = Inventory::new();
            inventory.stock(vec![ProductLine::new("P", "Prop", 1.0, initial)]).unwrap();

            let mut obtained = 0;
            for count in &requests {
                match inventory.claim(&ProductLine::request("P", *count)) {
                    Ok(line) => {
                        prop_assert_eq!(line.count, *count);
                        obtained += line.count;
                    }
                    Err(ClaimError::InsufficientStock { claimed, .. }) => {
                        prop_assert!(claimed.count < *count);
                        obtained += claimed.count;
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
                }
                prop_assert!(inventory.available("P").unwrap() >= 0);
            }

            let requested: i64 = requests.iter().sum();
            prop_assert_eq!(obtained, initial.min(requested));
            prop_assert_eq!(inventory.available("P").unwrap(), initial - obtained);
        }
    }
}
