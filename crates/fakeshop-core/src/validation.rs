//! # Validation Module
//!
//! Input checks applied at the adapter boundary, before a request reaches
//! the ledger or a cart.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  └── Shape and types of the request body                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Shop server commands                                          │
//! │  └── THIS MODULE: SKU format, quantities, cart ids                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory ledger                                              │
//! │  └── Unknown SKUs, stock limits, negative claims                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fakeshop_core::validation::{validate_quantity, validate_sku};
//!
//! validate_sku("A1234").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use uuid::Uuid;

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_SKU_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens and underscores
///
/// ## Example
/// ```rust
/// use fakeshop_core::validation::validate_sku;
///
/// assert!(validate_sku("A1234").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LENGTH {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a desired total line quantity (cart replacement).
///
/// Zero is allowed; it shrinks a line to nothing.
pub fn validate_count(count: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a quantity to add to a cart.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_ITEM_QUANTITY`
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Parses a caller-supplied cart id.
///
/// ```rust
/// use fakeshop_core::validation::validate_cart_id;
///
/// assert!(validate_cart_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert_eq!(
///     validate_cart_id("nope").unwrap_err().to_string(),
///     "invalid Cart ID"
/// );
/// ```
pub fn validate_cart_id(id: &str) -> ValidationResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidIdentifier {
        field: "Cart ID".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("A1234").is_ok());
        assert!(validate_sku("COKE-330").is_ok());
        assert!(validate_sku("product_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count(0).is_ok());
        assert!(validate_count(10).is_ok());
        assert!(validate_count(-1).is_err());
        assert!(validate_count(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_cart_id() {
        let id = validate_cart_id("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");

        assert_eq!(
            validate_cart_id("").unwrap_err(),
            ValidationError::InvalidIdentifier {
                field: "Cart ID".to_string()
            }
        );
        assert!(validate_cart_id("123").is_err());
    }
}
