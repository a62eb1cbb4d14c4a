//! # Validation Module
//!
//! Input validation utilities for the storefront engine.
//!
//! ## Validation Strategy
//! Pricing and delivery decisions respond to bad DOMAIN values with defined
//! no-effect outputs (zero discount, deny-with-reason). These validators
//! catch bad PRIMITIVE inputs — non-positive quantities, negative prices —
//! before they reach a cart mutation or a pricing call.
//!
//! ## Usage
//! ```rust
//! use nestbrew_core::validation::{validate_quantity, validate_unit_price_cents};
//!
//! validate_quantity(5).unwrap();
//! validate_unit_price_cents(650).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::LineItem;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (99)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (promo items)
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a full line item (quantity + unit price).
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_unit_price_cents(item.unit_price_cents)?;
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a subscription plan id's shape.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Letters, numbers, hyphens and underscores only
///
/// Note: an id that passes shape validation may still be unknown to the
/// plan table — that is a defined no-discount input, not an error.
pub fn validate_plan_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "plan id".to_string(),
        });
    }

    if id.len() > 50 {
        return Err(ValidationError::OutOfRange {
            field: "plan id length".to_string(),
            min: 1,
            max: 50,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "plan id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
