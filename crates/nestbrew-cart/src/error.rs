//! # Cart Errors
//!
//! Error taxonomy for the coordinator:
//! - caller errors (mutating before initialization completes)
//! - input errors (bad quantities, surfaced as core validation errors)
//! - collaborator errors (the Checkout Service failed; local state is
//!   left untouched and the failure is retryable)
//!
//! A remembered handle that turns out stale or completed is NOT an error —
//! the coordinator replaces it transparently.

use thiserror::Error;

use crate::service::CheckoutError;

// =============================================================================
// Cart Error
// =============================================================================

/// Coordinator-level failures surfaced to the presentation layer.
#[derive(Debug, Error)]
pub enum CartError {
    /// A mutation was requested before `initialize` completed. A caller
    /// error, reported as a domain error — never silently queued.
    #[error("cart session is not ready; call initialize first")]
    NotReady,

    /// A line item id was not present on the current cart snapshot.
    #[error("line item not in cart: {0}")]
    LineItemNotFound(String),

    /// Input validation failure (non-positive quantity, etc.).
    #[error("invalid cart input: {0}")]
    Validation(#[from] nestbrew_core::ValidationError),

    /// The external Checkout Service failed; the cached snapshot was left
    /// unchanged and the operation may be retried.
    #[error("checkout service error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_converts() {
        let err: CartError = CheckoutError::Unavailable("timeout".to_string()).into();
        assert!(matches!(err, CartError::Checkout(_)));
        assert_eq!(
            err.to_string(),
            "checkout service error: checkout service unavailable: timeout"
        );
    }

    #[test]
    fn test_not_ready_message() {
        assert_eq!(
            CartError::NotReady.to_string(),
            "cart session is not ready; call initialize first"
        );
    }
}
