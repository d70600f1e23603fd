//! # API Error Type
//!
//! Unified error type for shop commands and HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Fakeshop                               │
//! │                                                                         │
//! │  POST /cart/items                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad cart id? ─── ValidationError::InvalidIdentifier ──┐        │  │
//! │  │         │                                              │        │  │
//! │  │         ▼                                              ▼        │  │
//! │  │  Claim failed? ─── ClaimError::InsufficientStock ──── ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  HTTP 409 { "code": "INSUFFICIENT_STOCK", "message": "not enough..." }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors found while reading a cart (promotion defects, bonus stock that ran
//! out) are not `ApiError`s: they travel inside the cart view as strings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use fakeshop_core::{ClaimError, ValidationError};

/// API error returned from shop commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_IDENTIFIER",
///   "message": "invalid Cart ID"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown SKU (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart id could not be parsed (400)
    InvalidIdentifier,

    /// Claim partially or fully denied (409)
    InsufficientStock,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::InvalidIdentifier => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientStock => StatusCode::CONFLICT,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        let code = match err {
            ClaimError::UnknownSku { .. } => ErrorCode::NotFound,
            ClaimError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            ClaimError::NegativeCount { .. } => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidIdentifier { .. } => {
                ApiError::new(ErrorCode::InvalidIdentifier, err.to_string())
            }
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use fakeshop_core::ProductLine;

    #[test]
    fn test_invalid_identifier_mapping() {
        let err: ApiError = ValidationError::InvalidIdentifier {
            field: "Cart ID".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidIdentifier);
        assert_eq!(err.message, "invalid Cart ID");
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_claim_error_mapping() {
        let err: ApiError = ClaimError::InsufficientStock {
            requested: 3,
            claimed: ProductLine::new("A1234", "Carrot", 1.1, 1),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.code.status(), StatusCode::CONFLICT);

        let err: ApiError = ClaimError::UnknownSku {
            sku: "NOPE".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::InvalidIdentifier, "invalid Cart ID");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "INVALID_IDENTIFIER", "message": "invalid Cart ID" })
        );
    }
}
