//! # Error Types
//!
//! Domain-specific error types for fakeshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fakeshop-core errors (this file)                                      │
//! │  ├── StockError       - Stocking the ledger was rejected               │
//! │  ├── ClaimError       - A claim against the ledger failed (partially)  │
//! │  ├── PromotionError   - A registered rule is defective                 │
//! │  ├── SnapshotError    - Wraps the two above during cart reads          │
//! │  └── ValidationError  - Input validation failures (adapter side)       │
//! │                                                                         │
//! │  shop-server errors (separate crate)                                   │
//! │  └── ApiError         - What HTTP callers see (serialized)             │
//! │                                                                         │
//! │  Flow: ClaimError → ApiError → Caller                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, counts, rule name)
//! 3. Nothing in the core is fatal: every failure is a value
//! 4. A partial claim travels inside its error so the caller can keep it

use thiserror::Error;

use crate::types::ProductLine;

// =============================================================================
// Stock Error
// =============================================================================

/// Stocking the inventory ledger was rejected.
///
/// The previous inventory stays installed when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockError {
    /// Two catalog records share a SKU.
    #[error("found duplicate SKU \"{sku}\"")]
    DuplicateSku { sku: String },

    /// A catalog record carries a negative stock count.
    #[error("negative stock ({count}) for SKU \"{sku}\"")]
    NegativeStock { sku: String, count: i64 },
}

// =============================================================================
// Claim Error
// =============================================================================

/// A claim against the inventory ledger could not be (fully) honoured.
///
/// ## Partial Claims
/// ```text
/// claim(A1234 × 5), available = 3
///      │
///      ▼
/// stock → 0
///      │
///      ▼
/// Err(InsufficientStock { requested: 5, claimed: A1234 × 3 })
///      │
///      ▼
/// Cart keeps the 3 units and reports the error
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClaimError {
    /// No product with this SKU exists. Nothing was claimed.
    #[error("SKU \"{sku}\" does not exist")]
    UnknownSku { sku: String },

    /// Not enough stock. `claimed` is what was actually reserved and is
    /// authoritative; the ledger for this SKU is now at zero.
    #[error(
        "not enough stock for \"{}\": requested {requested}, claimed {}",
        .claimed.sku,
        .claimed.count
    )]
    InsufficientStock {
        requested: i64,
        claimed: ProductLine,
    },

    /// Negative claims would credit the ledger, which has no release path.
    #[error("cannot claim a negative count ({count}) of \"{sku}\"")]
    NegativeCount { sku: String, count: i64 },
}

impl ClaimError {
    /// Returns the SKU the failed claim was made against.
    pub fn sku(&self) -> &str {
        match self {
            ClaimError::UnknownSku { sku } | ClaimError::NegativeCount { sku, .. } => sku,
            ClaimError::InsufficientStock { claimed, .. } => &claimed.sku,
        }
    }

    /// Returns the partially claimed line, if any stock was reserved.
    pub fn partial(&self) -> Option<&ProductLine> {
        match self {
            ClaimError::InsufficientStock { claimed, .. } => Some(claimed),
            _ => None,
        }
    }
}

// =============================================================================
// Promotion Error
// =============================================================================

/// A registered promotion rule could not be evaluated.
///
/// This signals a defect in the promotion catalog, not a shopper error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PromotionError {
    /// The rule's category is not one the evaluator knows.
    ///
    /// `line` is the evaluated cart line, handed back unchanged.
    #[error("unknown promotion \"{category}\" in rule \"{promotion}\"")]
    UnrecognizedCategory {
        promotion: String,
        category: String,
        line: ProductLine,
    },
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Errors accumulated while reading a cart with promotions applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// A promotion rule failed to evaluate.
    #[error("internal error: {0}")]
    Internal(#[from] PromotionError),

    /// A promotion's bonus stock could not be (fully) claimed.
    #[error("promotion could not be applied: {0}")]
    PromotionNotApplied(#[from] ClaimError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur at the adapter boundary before a request reaches the
/// ledger or a cart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in a SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A caller-supplied identifier could not be parsed.
    #[error("invalid {field}")]
    InvalidIdentifier { field: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
