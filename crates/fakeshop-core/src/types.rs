//! # Domain Types
//!
//! Core domain types shared by the ledger, carts and promotions.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  ProductLine    │   │  CatalogEntry   │   │   Promotion         │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  sku            │   │  sku            │   │  name, sku          │   │
//! │  │  name           │   │  name           │   │  category           │   │
//! │  │  price (f64)    │   │  price          │   │  requires {sku, n}  │   │
//! │  │  count          │   │  (no quantity)  │   │  rule {sku, n, %}   │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Type, Three Meanings of `count`
//! - In the inventory ledger: absolute remaining stock
//! - In a cart: quantity already claimed from the ledger
//! - In a claim request: the delta to reserve

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Line
// =============================================================================

/// A product together with a quantity.
///
/// Catalog files spell the quantity `stock`; both spellings deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductLine {
    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Unit price. Plain floating point, no rounding policy.
    #[serde(default)]
    pub price: f64,

    /// Quantity; meaning depends on context (see module docs).
    #[serde(alias = "stock", default)]
    pub count: i64,
}

impl ProductLine {
    /// Creates a product line.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: f64, count: i64) -> Self {
        ProductLine {
            sku: sku.into(),
            name: name.into(),
            price,
            count,
        }
    }

    /// A line carrying only a SKU and a quantity, as callers submit them.
    pub fn request(sku: impl Into<String>, count: i64) -> Self {
        ProductLine::new(sku, String::new(), 0.0, count)
    }

    /// Returns a copy of this line with a different count.
    pub fn with_count(&self, count: i64) -> Self {
        ProductLine {
            count,
            ..self.clone()
        }
    }

    /// Price × quantity.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.count as f64
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// A product as listed to shoppers: quantities are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub sku: String,
    pub name: String,
    pub price: f64,
}

impl From<&ProductLine> for CatalogEntry {
    fn from(line: &ProductLine) -> Self {
        CatalogEntry {
            sku: line.sku.clone(),
            name: line.name.clone(),
            price: line.price,
        }
    }
}

// =============================================================================
// Promotion Rules
// =============================================================================

/// The kind of promotion a rule grants.
///
/// Unknown category text is kept rather than rejected at load time; the
/// evaluator reports it when the rule is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PromotionCategory {
    /// Buying N of one SKU earns units of another SKU for free.
    Freebie,
    /// Buy N, get M of the same SKU free.
    NForM,
    /// Percentage off once a quantity threshold is met.
    Discount,
    /// Anything else found in the catalog.
    Unrecognized(String),
}

impl From<String> for PromotionCategory {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "freebie" => PromotionCategory::Freebie,
            "n4m" | "n-for-m" | "n_for_m" => PromotionCategory::NForM,
            "discount" => PromotionCategory::Discount,
            _ => PromotionCategory::Unrecognized(s),
        }
    }
}

impl From<&str> for PromotionCategory {
    fn from(s: &str) -> Self {
        PromotionCategory::from(s.to_string())
    }
}

impl From<PromotionCategory> for String {
    fn from(category: PromotionCategory) -> Self {
        category.to_string()
    }
}

impl std::fmt::Display for PromotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromotionCategory::Freebie => write!(f, "freebie"),
            PromotionCategory::NForM => write!(f, "n4m"),
            PromotionCategory::Discount => write!(f, "discount"),
            PromotionCategory::Unrecognized(other) => write!(f, "{}", other),
        }
    }
}

/// What a cart line must contain for a rule to trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub count: i64,
}

/// What a rule grants once triggered.
///
/// Which fields matter depends on the category:
/// - freebie: `sku` (bonus product)
/// - n-for-m: `count` (units subtracted from the free-unit formula)
/// - discount: `discount` (fraction of the unit price, 0.3 = 30%)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDetail {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub discount: f64,
}

/// A promotion rule. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Name shown on the promotion line.
    pub name: String,

    /// SKU the promotion line is keyed by.
    pub sku: String,

    pub category: PromotionCategory,

    #[serde(default)]
    pub requires: Requirement,

    #[serde(default)]
    pub rule: RuleDetail,
}

// =============================================================================
// Unit Tests
// =============================================================================
