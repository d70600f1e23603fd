//! # Cart Registry
//!
//! Process-wide map from cart id to cart.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Lock Scopes                                          │
//! │                                                                         │
//! │  CartRegistry ── Mutex<HashMap<Uuid, CartHandle>>                       │
//! │                  held only for lookup / insert                          │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  CartHandle ──── Arc<Mutex<Cart>>                                       │
//! │                  held for one add / replace / snapshot                  │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  Inventory ───── Mutex<HashMap<..>>                                     │
//! │                  held for one claim                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locks are always taken in that order, and the registry lock is released
//! before a cart lock is taken. Operations on different carts run in
//! parallel; operations on the same cart are serialized.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cart::{Cart, CartSnapshot};
use crate::error::ClaimError;
use crate::inventory::Inventory;
use crate::types::{ProductLine, Promotion};

/// Shared handle to one cart.
#[derive(Debug, Clone)]
pub struct CartHandle {
    cart: Arc<Mutex<Cart>>,
}

impl CartHandle {
    fn new(cart: Cart) -> Self {
        CartHandle {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Runs `f` with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock())
    }

    /// Runs `f` with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        f(&mut self.lock())
    }

    pub fn add_line(&self, inventory: &Inventory, line: &ProductLine) -> Result<(), ClaimError> {
        self.with_cart_mut(|cart| cart.add_line(inventory, line))
    }

    pub fn replace(&self, inventory: &Inventory, lines: &[ProductLine]) -> Vec<ClaimError> {
        self.with_cart_mut(|cart| cart.replace(inventory, lines))
    }

    pub fn snapshot(&self, inventory: &Inventory, rules: &[Promotion]) -> CartSnapshot {
        self.with_cart_mut(|cart| cart.snapshot(inventory, rules))
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.with_cart(Cart::expires_at)
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Every live cart, keyed by id.
///
/// Carts are created on first use and never evicted.
#[derive(Debug)]
pub struct CartRegistry {
    carts: Mutex<HashMap<Uuid, CartHandle>>,
    ttl: Duration,
}

impl CartRegistry {
    /// Creates an empty registry. New carts expire `ttl` after creation.
    pub fn new(ttl: Duration) -> Self {
        info!(ttl_secs = ttl.num_seconds(), "Cart registry created");
        CartRegistry {
            carts: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the cart for `id`, creating it if needed.
    ///
    /// With `None` a fresh v4 id is generated. Concurrent calls with the same
    /// unknown id create exactly one cart and all receive it.
    pub fn retrieve_or_create(&self, id: Option<Uuid>) -> (Uuid, CartHandle) {
        let id = id.unwrap_or_else(Uuid::new_v4);
        let mut carts = self.lock();

        let handle = match carts.entry(id) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let expires_at = Utc::now() + self.ttl;
                debug!(cart_id = %id, %expires_at, "Cart created");
                entry.insert(CartHandle::new(Cart::new(expires_at))).clone()
            }
        };

        (id, handle)
    }

    /// Number of carts ever created.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, CartHandle>> {
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PromotionCategory, Requirement, RuleDetail};
    use std::thread;

    fn registry() -> CartRegistry {
        CartRegistry::new(Duration::seconds(600))
    }

    #[test]
    fn test_none_creates_fresh_cart() {
        let registry = registry();
        let (first, _) = registry.retrieve_or_create(None);
        let (second, _) = registry.retrieve_or_create(None);

        assert_ne!(first, second);
        assert_eq!(first.get_version_num(), 4);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_same_id_returns_same_cart() {
        let inventory = Inventory::new();
        inventory
            .stock(vec![ProductLine::new("A1234", "Carrot", 1.1, 10)])
            .unwrap();
        let registry = registry();

        let (id, handle) = registry.retrieve_or_create(None);
        handle
            .add_line(&inventory, &ProductLine::request("A1234", 2))
            .unwrap();

        let (again, same) = registry.retrieve_or_create(Some(id));
        assert_eq!(again, id);
        let snapshot = same.snapshot(&inventory, &[]);
        assert_eq!(snapshot.lines["A1234"].count, 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_id_is_adopted() {
        let registry = registry();
        let id = Uuid::new_v4();
        let (returned, _) = registry.retrieve_or_create(Some(id));
        assert_eq!(returned, id);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_new_cart_expires_after_ttl() {
        let before = Utc::now();
        let registry = registry();
        let (_, handle) = registry.retrieve_or_create(None);

        let expires_at = handle.expires_at();
        assert!(expires_at >= before + Duration::seconds(600));
        assert!(expires_at <= Utc::now() + Duration::seconds(600));
    }

    #[test]
    fn test_concurrent_creation_is_exactly_once() {
        let inventory = Arc::new(Inventory::new());
        inventory
            .stock(vec![ProductLine::new("A1234", "Carrot", 1.1, 100)])
            .unwrap();
        let registry = Arc::new(registry());
        let id = Uuid::new_v4();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let inventory = Arc::clone(&inventory);
                thread::spawn(move || {
                    let (_, handle) = registry.retrieve_or_create(Some(id));
                    handle
                        .add_line(&inventory, &ProductLine::request("A1234", 1))
                        .unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
        let (_, handle) = registry.retrieve_or_create(Some(id));
        assert_eq!(handle.with_cart(|cart| cart.lines()["A1234"].count), 8);
        assert_eq!(inventory.available("A1234"), Some(92));
    }

    #[test]
    fn test_concurrent_snapshots_claim_bonus_once() {
        let inventory = Arc::new(Inventory::new());
        inventory
            .stock(vec![
                ProductLine::new("A1234", "Carrot", 1.1, 10),
                ProductLine::new("B1234", "Potato", 0.5, 5),
            ])
            .unwrap();
        let rules = Arc::new(vec![Promotion {
            name: "Free potato".to_string(),
            sku: "FREEBIE".to_string(),
            category: PromotionCategory::Freebie,
            requires: Requirement {
                sku: "A1234".to_string(),
                count: 1,
            },
            rule: RuleDetail {
                sku: "B1234".to_string(),
                count: 1,
                discount: 0.0,
            },
        }]);
        let registry = registry();
        let (_, handle) = registry.retrieve_or_create(None);
        handle
            .add_line(&inventory, &ProductLine::request("A1234", 3))
            .unwrap();

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let handle = handle.clone();
                let inventory = Arc::clone(&inventory);
                let rules = Arc::clone(&rules);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        let errors = handle.replace(&inventory, &[ProductLine::request("A1234", 3)]);
                        assert!(errors.is_empty());
                    }
                    handle.snapshot(&inventory, &rules)
                })
            })
            .collect();

        for worker in workers {
            let snapshot = worker.join().unwrap();
            assert_eq!(snapshot.promotions["FREEBIE"].count, 3);
            assert!(snapshot.errors.is_none());
        }

        assert_eq!(inventory.available("B1234"), Some(2));
        assert_eq!(inventory.available("A1234"), Some(7));
        assert_eq!(handle.with_cart(|cart| cart.promo_claims()["B1234"].count), 3);
    }
}
