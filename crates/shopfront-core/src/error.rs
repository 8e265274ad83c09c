//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                      │
//! │  ├── CoreError        - Lookup failures, wraps ValidationError          │
//! │  └── ValidationError  - Client-side precondition failures               │
//! │                                                                         │
//! │  shopfront-api                                                          │
//! │  └── RemoteError      - Non-2xx or network failure                      │
//! │                                                                         │
//! │  shopfront-bridge                                                       │
//! │  └── BridgeError      - Export host unreachable                         │
//! │                                                                         │
//! │  desktop app                                                            │
//! │  └── AppError         - What the shell shows { code, message }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation errors never reach the backend: they are raised before any
//! request is built.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product matched the identifier typed or scanned at the counter.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "P0X1"
    ///      │
    ///      ▼
    /// id match? no ── name match (case-insensitive)? no
    ///      │
    ///      ▼
    /// ProductNotFound("P0X1") → prompt, identifier field cleared
    /// ```
    #[error("Product with ID/Name \"{0}\" not found")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Finalize was attempted with no lines.
    #[error("Cannot finalize an empty bill.")]
    EmptyBill,

    /// The flat discount is larger than the subtotal.
    #[error("Discount cannot be more than the subtotal.")]
    DiscountExceedsSubtotal,
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("P0X1".to_string());
        assert_eq!(err.to_string(), "Product with ID/Name \"P0X1\" not found");

        assert_eq!(
            ValidationError::required("name").to_string(),
            "name is required"
        );
        assert_eq!(
            ValidationError::DiscountExceedsSubtotal.to_string(),
            "Discount cannot be more than the subtotal."
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::EmptyBill.into();
        assert!(matches!(core_err, CoreError::Validation(ValidationError::EmptyBill)));
    }
}
