//! # Cart Aggregate
//!
//! One shopper's claimed line items plus the bonus stock already reserved on
//! behalf of promotions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_line(A × 5) ───────► claim 5 from ledger ──► line A += claimed     │
//! │                                                                         │
//! │  replace([A × 3]) ──────► delta = 3 - held ─────► claim delta if > 0    │
//! │                                                   shrink if < 0         │
//! │                                                                         │
//! │  snapshot() ────────────► every line × every rule                       │
//! │                           ├── promotion line ──► shown to shopper       │
//! │                           └── bonus claim ─────► claim only what the    │
//! │                                                  promo cache lacks      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Line counts are quantities already deducted from the ledger
//! - The promo cache holds, per bonus SKU, the cumulative stock reserved for
//!   promotions; re-reading an unchanged cart claims nothing new
//! - Shrinking a line never returns stock to the ledger
//! - Errors are accumulated, never short-circuited

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{ClaimError, SnapshotError};
use crate::inventory::Inventory;
use crate::types::{ProductLine, Promotion};

/// A shopping cart.
#[derive(Debug, Clone)]
pub struct Cart {
    contents: BTreeMap<String, ProductLine>,
    promo_claims: BTreeMap<String, ProductLine>,
    expires_at: DateTime<Utc>,
}

/// A cart read with promotions applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    /// Claimed line items, keyed by SKU.
    pub lines: BTreeMap<String, ProductLine>,

    /// Promotion lines, keyed by the promotion's SKU.
    pub promotions: BTreeMap<String, ProductLine>,

    /// `None` when nothing went wrong.
    pub errors: Option<Vec<SnapshotError>>,
}

impl CartSnapshot {
    /// Sum of all line totals, promotion lines included.
    pub fn total(&self) -> f64 {
        self.lines
            .values()
            .chain(self.promotions.values())
            .map(ProductLine::line_total)
            .sum()
    }
}

impl Cart {
    /// Creates an empty cart. `expires_at` is carried, not enforced.
    pub fn new(expires_at: DateTime<Utc>) -> Self {
        Cart {
            contents: BTreeMap::new(),
            promo_claims: BTreeMap::new(),
            expires_at,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Claimed line items.
    pub fn lines(&self) -> &BTreeMap<String, ProductLine> {
        &self.contents
    }

    /// Bonus stock reserved for promotions so far, per bonus SKU.
    pub fn promo_claims(&self) -> &BTreeMap<String, ProductLine> {
        &self.promo_claims
    }

    /// Claims `product.count` more units and merges them into the cart.
    ///
    /// A partial claim is still merged before its error is returned, so the
    /// cart always reflects what was actually reserved.
    pub fn add_line(&mut self, inventory: &Inventory, product: &ProductLine) -> Result<(), ClaimError> {
        match inventory.claim(product) {
            Ok(claimed) => {
                self.merge(claimed);
                Ok(())
            }
            Err(err) => {
                if let Some(partial) = err.partial() {
                    self.merge(partial.clone());
                }
                Err(err)
            }
        }
    }

    /// Sets each given SKU to the given total quantity.
    ///
    /// Every line is processed even if an earlier one failed. Returns the
    /// per-line errors, empty on full success. A negative total is an error
    /// and leaves that line as it was.
    pub fn replace(&mut self, inventory: &Inventory, lines: &[ProductLine]) -> Vec<ClaimError> {
        let mut errors = Vec::new();

        for desired in lines {
            if desired.count < 0 {
                errors.push(ClaimError::NegativeCount {
                    sku: desired.sku.clone(),
                    count: desired.count,
                });
                continue;
            }

            let held = self.contents.get(&desired.sku).map(|l| l.count);
            let delta = desired.count - held.unwrap_or(0);

            if delta < 0 {
                // Stock stays claimed: the ledger has no release operation.
                if let Some(line) = self.contents.get_mut(&desired.sku) {
                    debug!(
                        sku = %desired.sku,
                        from = line.count,
                        to = desired.count,
                        "Line shrunk, stock not returned"
                    );
                    line.count = desired.count;
                }
                continue;
            }
            if delta == 0 && held.is_some() {
                continue;
            }

            let claimed = match inventory.claim(&desired.with_count(delta)) {
                Ok(claimed) => claimed,
                Err(err) => {
                    let partial = err.partial().cloned();
                    errors.push(err);
                    match partial {
                        Some(partial) => partial,
                        None => continue,
                    }
                }
            };

            let line = self
                .contents
                .entry(desired.sku.clone())
                .or_insert_with(|| claimed.with_count(0));
            line.name = claimed.name;
            line.price = claimed.price;
            line.count += claimed.count;
        }

        errors
    }

    /// Reads the cart with every rule applied to every line.
    ///
    /// Rules that reserve bonus stock only claim the difference between what
    /// they are now entitled to and what the promo cache already holds.
    pub fn snapshot(&mut self, inventory: &Inventory, rules: &[Promotion]) -> CartSnapshot {
        let mut promotions = BTreeMap::new();
        let mut errors: Vec<SnapshotError> = Vec::new();

        for line in self.contents.values() {
            for rule in rules {
                let evaluation = match rule.evaluate(line) {
                    Ok(evaluation) => evaluation,
                    Err(err) => {
                        errors.push(err.into());
                        continue;
                    }
                };

                let mut promotion = evaluation.promotion;
                if let Some(request) = evaluation.claim {
                    let shown = claim_bonus(&mut self.promo_claims, inventory, request, &mut errors);
                    if let Some(promotion) = promotion.as_mut() {
                        promotion.count = shown;
                    }
                }
                if let Some(promotion) = promotion {
                    promotions.insert(promotion.sku.clone(), promotion);
                }
            }
        }

        debug!(
            lines = self.contents.len(),
            promotions = promotions.len(),
            errors = errors.len(),
            "Cart evaluated"
        );

        CartSnapshot {
            lines: self.contents.clone(),
            promotions,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }

    fn merge(&mut self, claimed: ProductLine) {
        match self.contents.entry(claimed.sku.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().count += claimed.count,
            Entry::Vacant(entry) => {
                entry.insert(claimed);
            }
        }
    }
}

/// Tops the promo cache up to `request.count` and returns the count to show.
fn claim_bonus(
    cache: &mut BTreeMap<String, ProductLine>,
    inventory: &Inventory,
    request: ProductLine,
    errors: &mut Vec<SnapshotError>,
) -> i64 {
    let entitled = request.count;
    let held = cache.get(&request.sku).map(|c| c.count).unwrap_or(0);
    let increment = entitled - held;

    if increment <= 0 {
        return entitled;
    }

    let obtained = match inventory.claim(&request.with_count(increment)) {
        Ok(obtained) => obtained,
        Err(err) => {
            let partial = err.partial().cloned();
            errors.push(err.into());
            match partial {
                Some(partial) => partial,
                None => return held.min(entitled),
            }
        }
    };

    let cumulative = held + obtained.count;
    cache.insert(obtained.sku.clone(), obtained.with_count(cumulative));
    cumulative
}

// =============================================================================
// Unit Tests
// =============================================================================
