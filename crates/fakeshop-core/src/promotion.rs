//! # Promotion Rules
//!
//! Stateless evaluation of promotion rules against a single cart line, plus
//! the catalog the rules are registered in.
//!
//! ## Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Category   Trigger               Claim request      Promotion line     │
//! │  ────────   ───────               ─────────────      ──────────────     │
//! │  freebie    line.sku matches      rule.sku × units   price 0 × units    │
//! │             units = n / req.n                                           │
//! │                                                                         │
//! │  n4m        line.sku matches      (none)             -unit price ×      │
//! │                                                      (n/req.n)·req.n    │
//! │                                                      - rule.n           │
//! │                                                                         │
//! │  discount   n >= req.n            (none)             -discount·price ×  │
//! │                                                      n                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are independent: one line may trigger several of them. The n4m
//! count is not clamped and goes negative for small quantities.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::error::PromotionError;
use crate::types::{ProductLine, Promotion, PromotionCategory};

/// Result of evaluating one rule against one cart line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Bonus stock to reserve from the inventory ledger.
    pub claim: Option<ProductLine>,

    /// Line shown to the shopper, keyed by the promotion's SKU.
    pub promotion: Option<ProductLine>,
}

impl Promotion {
    /// Evaluates this rule against a cart line.
    ///
    /// Lines for other SKUs produce an empty evaluation. An unrecognized
    /// category is an error that hands the line back unchanged.
    pub fn evaluate(&self, line: &ProductLine) -> Result<Evaluation, PromotionError> {
        if line.sku != self.requires.sku {
            return Ok(Evaluation::default());
        }

        match &self.category {
            PromotionCategory::Freebie => {
                let Some(units) = self.qualifying_sets(line) else {
                    return Ok(Evaluation::default());
                };
                Ok(Evaluation {
                    claim: Some(ProductLine::request(&self.rule.sku, units)),
                    promotion: Some(self.promotion_line(0.0, units)),
                })
            }
            PromotionCategory::NForM => {
                let Some(sets) = self.qualifying_sets(line) else {
                    return Ok(Evaluation::default());
                };
                let free_units = sets * self.requires.count - self.rule.count;
                Ok(Evaluation {
                    claim: None,
                    promotion: Some(self.promotion_line(-line.price, free_units)),
                })
            }
            PromotionCategory::Discount => {
                if line.count < self.requires.count {
                    return Ok(Evaluation::default());
                }
                Ok(Evaluation {
                    claim: None,
                    promotion: Some(
                        self.promotion_line(-self.rule.discount * line.price, line.count),
                    ),
                })
            }
            PromotionCategory::Unrecognized(category) => {
                Err(PromotionError::UnrecognizedCategory {
                    promotion: self.name.clone(),
                    category: category.clone(),
                    line: line.clone(),
                })
            }
        }
    }

    /// How many times the requirement fits into the line.
    ///
    /// `None` when the rule requires a non-positive quantity.
    fn qualifying_sets(&self, line: &ProductLine) -> Option<i64> {
        if self.requires.count <= 0 {
            warn!(
                promotion = %self.name,
                required = self.requires.count,
                "Promotion requires a non-positive quantity, skipping"
            );
            return None;
        }
        Some(line.count / self.requires.count)
    }

    fn promotion_line(&self, price: f64, count: i64) -> ProductLine {
        ProductLine::new(&self.sku, &self.name, price, count)
    }
}

// =============================================================================
// Promotion Catalog
// =============================================================================

/// The ordered list of registered rules.
///
/// Registration swaps the whole list at once; readers hold on to the `Arc`
/// they got, so a cart read never sees a half-replaced catalog.
#[derive(Debug, Default)]
pub struct PromotionCatalog {
    rules: RwLock<Arc<Vec<Promotion>>>,
}

impl PromotionCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every registered rule.
    pub fn register(&self, rules: Vec<Promotion>) {
        let rules = Arc::new(rules);
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = rules;
    }

    /// The current rule list, in registration order.
    pub fn rules(&self) -> Arc<Vec<Promotion>> {
        Arc::clone(&self.rules.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.rules().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Requirement, RuleDetail};

    fn promotion(
        name: &str,
        sku: &str,
        category: &str,
        requires: (&str, i64),
        rule: (&str, i64, f64),
    ) -> Promotion {
        Promotion {
            name: name.to_string(),
            sku: sku.to_string(),
            category: PromotionCategory::from(category),
            requires: Requirement {
                sku: requires.0.to_string(),
                count: requires.1,
            },
            rule: RuleDetail {
                sku: rule.0.to_string(),
                count: rule.1,
                discount: rule.2,
            },
        }
    }

    #[test]
    fn test_non_matching_line_yields_nothing() {
        let promo = promotion("A freebie", "FREEBIE", "freebie", ("ABC123", 1), ("DEF567", 1, 0.0));
        let evaluation = promo
            .evaluate(&ProductLine::new("12345678", "Test", 11.5, 2))
            .unwrap();
        assert_eq!(evaluation, Evaluation::default());
    }

    #[test]
    fn test_freebie() {
        let promo = promotion("A freebie", "FREEBIE", "freebie", ("ABC123", 1), ("DEF567", 1, 0.0));
        let evaluation = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 11.5, 2))
            .unwrap();

        assert_eq!(evaluation.claim, Some(ProductLine::new("DEF567", "", 0.0, 2)));
        assert_eq!(
            evaluation.promotion,
            Some(ProductLine::new("FREEBIE", "A freebie", 0.0, 2))
        );
    }

    #[test]
    fn test_freebie_rounds_down() {
        let promo = promotion("Buy 3", "FREE3", "freebie", ("ABC123", 3), ("DEF567", 1, 0.0));
        let evaluation = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 1.0, 8))
            .unwrap();
        assert_eq!(evaluation.claim.map(|c| c.count), Some(2));
    }

    #[test]
    fn test_n_for_m() {
        let promo = promotion("A 2 for 1", "2FOR1", "n4m", ("ABC123", 2), ("", 1, 0.0));
        let evaluation = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 11.5, 2))
            .unwrap();

        assert_eq!(evaluation.claim, None);
        assert_eq!(
            evaluation.promotion,
            Some(ProductLine::new("2FOR1", "A 2 for 1", -11.5, 1))
        );
    }

    #[test]
    fn test_n_for_m_goes_negative_for_small_lines() {
        let promo = promotion("A 2 for 1", "2FOR1", "n4m", ("ABC123", 2), ("", 1, 0.0));
        let evaluation = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 11.5, 1))
            .unwrap();
        assert_eq!(evaluation.promotion.map(|p| p.count), Some(-1));
    }

    #[test]
    fn test_discount_threshold() {
        let promo = promotion("A discount", "DISCOUNT", "discount", ("ABC123", 10), ("", 0, 0.3));

        let below = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 15.0, 2))
            .unwrap();
        assert_eq!(below, Evaluation::default());

        let met = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 15.0, 10))
            .unwrap();
        assert_eq!(met.claim, None);
        let line = met.promotion.unwrap();
        assert_eq!(line.sku, "DISCOUNT");
        assert_eq!(line.name, "A discount");
        assert_eq!(line.count, 10);
        assert!((line.price - -4.5).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognized_category_returns_line() {
        let promo = promotion("Mystery", "M1", "bogo", ("ABC123", 1), ("", 0, 0.0));
        let line = ProductLine::new("ABC123", "Test", 11.5, 2);
        let err = promo.evaluate(&line).unwrap_err();

        let PromotionError::UnrecognizedCategory {
            category,
            line: returned,
            ..
        } = err;
        assert_eq!(category, "bogo");
        assert_eq!(returned, line);
    }

    #[test]
    fn test_zero_requirement_is_skipped() {
        let promo = promotion("Broken", "B0", "freebie", ("ABC123", 0), ("DEF567", 1, 0.0));
        let evaluation = promo
            .evaluate(&ProductLine::new("ABC123", "Test", 1.0, 5))
            .unwrap();
        assert_eq!(evaluation, Evaluation::default());
    }

    #[test]
    fn test_catalog_register_replaces_rules() {
        let catalog = PromotionCatalog::new();
        assert!(catalog.is_empty());

        catalog.register(vec![
            promotion("One", "P1", "freebie", ("A", 1), ("B", 1, 0.0)),
            promotion("Two", "P2", "discount", ("A", 1), ("", 0, 0.1)),
        ]);
        let held = catalog.rules();
        assert_eq!(catalog.len(), 2);

        catalog.register(vec![promotion("Three", "P3", "n4m", ("A", 2), ("", 1, 0.0))]);
        assert_eq!(catalog.len(), 1);
        // Readers keep the list they started with.
        assert_eq!(held.len(), 2);
        assert_eq!(held[0].name, "One");
    }
}
