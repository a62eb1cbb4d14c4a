//! # nestbrew-core: Pure Business Logic for the Nestbrew Storefront
//!
//! This crate is the **heart** of the storefront: the order pricing and
//! delivery-eligibility engine, as pure functions with zero I/O
//! dependencies. Incorrect rendering is a cosmetic bug; incorrect behavior
//! here is a wrong charge or an impossible delivery date.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Nestbrew Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront Frontend (presentation)              │   │
//! │  │    Product page ──► Cart drawer ──► Date picker ──► Checkout   │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼─────────────────┐  ┌────────────▼────────────────┐  │
//! │  │   ★ nestbrew-core (THIS) ★      │  │       nestbrew-cart         │  │
//! │  │                                 │  │                             │  │
//! │  │  ┌─────────┐  ┌─────────────┐   │  │  CartCoordinator            │  │
//! │  │  │ pricing │  │  delivery   │   │  │    │                        │  │
//! │  │  │ money   │  │  calendar   │   │  │    ▼                        │  │
//! │  │  │ catalog │  │  config     │   │  │  external Checkout Service  │  │
//! │  │  └─────────┘  └─────────────┘   │  │  (source of truth)          │  │
//! │  │                                 │  └─────────────────────────────┘  │
//! │  │  NO I/O • PURE FUNCTIONS        │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, PriceBreakdown, DateDecision, ...)
//! - [`money`] - Money and rates with integer arithmetic (no floating point!)
//! - [`pricing`] - Discount & total calculator
//! - [`delivery`] - Delivery-date eligibility rules
//! - [`catalog`] - Typed variant resolution
//! - [`config`] - Hot-swappable storefront configuration
//! - [`error`] - Domain error types
//! - [`validation`] - Primitive input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; "now" is a parameter
//! 2. **No I/O**: network, file system and browser storage are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), rates are bps
//! 4. **Defined No-Effect Inputs**: unknown plan id = zero discount, bad
//!    date = typed deny; errors are for malformed configuration only
//!
//! ## Example Usage
//!
//! ```rust
//! use nestbrew_core::config::StorefrontConfig;
//! use nestbrew_core::pricing::compute_order_total;
//! use nestbrew_core::types::LineItem;
//!
//! let config = StorefrontConfig::default();
//! let items = vec![LineItem::new(600, 12)]; // 12 × $6.00
//!
//! let breakdown = compute_order_total(&config, &items, None, true, true);
//! assert_eq!(breakdown.subtotal_cents, 7200);
//! assert!(breakdown.delivery_fee.waived);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use nestbrew_core::Money` instead of
// `use nestbrew_core::money::Money`

pub use config::{DeliveryPolicy, StorefrontConfig};
pub use delivery::DeliveryCalendar;
pub use error::{CoreError, ValidationError};
pub use money::{Money, RateBps};
pub use pricing::{compute_order_total, free_delivery_progress};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// The product is perishable and made to order; a three-digit quantity is
/// almost certainly a typo (100 instead of 10) and would not be fulfillable
/// same-week anyway.
pub const MAX_LINE_QUANTITY: i64 = 99;
