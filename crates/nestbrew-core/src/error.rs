//! # Error Types
//!
//! Domain-specific error types for nestbrew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nestbrew-core errors (this file)                                      │
//! │  ├── CoreError        - Configuration / domain rule failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  nestbrew-cart errors (separate crate)                                 │
//! │  ├── CheckoutError    - External Checkout Service failures             │
//! │  └── CartError        - Coordinator state machine violations           │
//! │                                                                         │
//! │  NOTE: pricing and delivery decisions NEVER error for well-formed      │
//! │  inputs — a bad plan id is a zero discount, a bad date is a typed      │
//! │  deny decision. Errors here are for malformed configuration.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core configuration and domain rule errors.
///
/// These mostly surface when loading or validating storefront
/// configuration. They should be caught at startup, not mid-checkout.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storefront configuration failed to parse.
    #[error("invalid storefront configuration: {0}")]
    ConfigParse(String),

    /// A weekday string in the delivery policy could not be parsed.
    #[error("invalid weekday in delivery policy: {0}")]
    InvalidWeekday(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input values don't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable weekday name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 99,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 99");

        let err = CoreError::InvalidWeekday("Funday".to_string());
        assert_eq!(
            err.to_string(),
            "invalid weekday in delivery policy: Funday"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "plan id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
