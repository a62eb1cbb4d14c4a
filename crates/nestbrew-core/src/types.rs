//! # Domain Types
//!
//! Core domain types for the Nestbrew storefront engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │    LineItem     │   │ QuantityDiscountTier │   │SubscriptionPlan │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │ unit_price_cents│   │  min_quantity        │   │  id             │  │
//! │  │ quantity        │   │  discount_bps        │   │  discount_bps   │  │
//! │  └────────┬────────┘   └──────────┬───────────┘   └────────┬────────┘  │
//! │           │                       │                        │           │
//! │           └───────────────────────┼────────────────────────┘           │
//! │                                   ▼                                    │
//! │                         ┌──────────────────┐                           │
//! │                         │  PriceBreakdown  │  ◄── published to UI      │
//! │                         └──────────────────┘                           │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  PurchaseType   │   │  DateDecision   │  ◄── published to UI        │
//! │  │  OneTime        │   │  allowed        │                             │
//! │  │  Subscription   │   │  reason         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{Money, RateBps};

// =============================================================================
// Purchase Type
// =============================================================================

/// How the customer is buying: a one-off order or a recurring subscription.
///
/// Fixed at selection time; it switches the delivery-eligibility rule set
/// and enables the subscription discount in pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    /// Single order, delivered once.
    OneTime,
    /// Recurring weekly deliveries on the designated weekday.
    Subscription,
}

// =============================================================================
// Line Item
// =============================================================================

/// A single cart line: one variant at a unit price, N times.
///
/// Ephemeral — constructed from catalog/variant selection for a pricing
/// call, never persisted by this engine. The external Checkout Service
/// owns the authoritative line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unit price in cents at time of selection.
    pub unit_price_cents: i64,
    /// Quantity, >= 1 (validated, not assumed).
    pub quantity: i64,
}

impl LineItem {
    /// Creates a new line item.
    pub const fn new(unit_price_cents: i64, quantity: i64) -> Self {
        LineItem {
            unit_price_cents,
            quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quantity Discount Tier
// =============================================================================

/// A threshold-quantity / discount-rate pair.
///
/// ## Invariant
/// Tiers are selected by **highest qualifying discount rate**, never by
/// highest `min_quantity` and never by table position. The table is NOT
/// assumed to be sorted, and discount size is NOT assumed monotonic with
/// quantity — the selection in `pricing` verifies this independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityDiscountTier {
    /// Minimum total cart quantity for this tier to qualify.
    pub min_quantity: i64,
    /// Discount rate in basis points (500 = 5%).
    pub discount_bps: RateBps,
}

// =============================================================================
// Subscription Plan
// =============================================================================

/// A recurring delivery plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    /// Business identifier, e.g. "weekly-3".
    pub id: String,
    /// Deliveries per week (>= 1).
    pub deliveries_per_week: u32,
    /// Plan discount rate in basis points.
    pub discount_bps: RateBps,
    /// Minimum commitment in weeks.
    pub min_duration_weeks: u32,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// One discount component of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLine {
    /// Discount amount in cents (already rounded).
    pub amount_cents: i64,
    /// The rate that produced the amount.
    pub rate_bps: RateBps,
    /// Whether any discount actually applied.
    pub applied: bool,
}

impl DiscountLine {
    /// A zero, not-applied discount line.
    pub const fn none() -> Self {
        DiscountLine {
            amount_cents: 0,
            rate_bps: RateBps::from_bps(0),
            applied: false,
        }
    }

    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// The delivery fee component of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeLine {
    /// Fee amount in cents (0 when waived or when no delivery is required).
    pub amount_cents: i64,
    /// True only when the post-discount subtotal met the waiver threshold.
    pub waived: bool,
}

impl DeliveryFeeLine {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// A fully itemized order total, published to the UI.
///
/// ## Invariants
/// - `total_cents == subtotal_after_discounts_cents + delivery_fee.amount_cents + tax_cents`
/// - `subtotal_after_discounts_cents == subtotal_cents - quantity_discount.amount_cents - subscription_discount.amount_cents`
///
/// Discounts are additive against the original subtotal, not compounded.
/// Every field is an already-rounded cent amount; `total_cents` is the sum
/// of rounded components, never a separately rounded raw sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal_cents: i64,
    pub quantity_discount: DiscountLine,
    pub subscription_discount: DiscountLine,
    pub subtotal_after_discounts_cents: i64,
    pub delivery_fee: DeliveryFeeLine,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub total_quantity: i64,
}

impl PriceBreakdown {
    /// An all-zero breakdown for an empty cart.
    pub const fn empty() -> Self {
        PriceBreakdown {
            subtotal_cents: 0,
            quantity_discount: DiscountLine::none(),
            subscription_discount: DiscountLine::none(),
            subtotal_after_discounts_cents: 0,
            delivery_fee: DeliveryFeeLine {
                amount_cents: 0,
                waived: false,
            },
            tax_cents: 0,
            total_cents: 0,
            total_quantity: 0,
        }
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Free Delivery Progress
// =============================================================================

/// "Spend $X more for free delivery" progress, published to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FreeDeliveryProgress {
    /// The configured waiver threshold in cents.
    pub threshold_cents: i64,
    /// Cents still to spend; clamped at 0 once qualified.
    pub remaining_cents: i64,
    /// Progress toward the threshold, 0-100 (clamped at 100).
    pub percentage: u32,
    /// True once the subtotal meets the threshold.
    pub qualified: bool,
}

// =============================================================================
// Date Decision
// =============================================================================

/// Why a candidate delivery date was denied.
///
/// One variant per rule in the eligibility decision list, so the UI and
/// tests can distinguish a cutoff denial from a generic past-date denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No date was supplied.
    MissingDate,
    /// Same-day delivery is never offered.
    SameDay,
    /// Next-day delivery was forfeited by ordering at/after the cutoff hour.
    AfterCutoff,
    /// Candidate is in the past.
    PastDate,
    /// Candidate is earlier than the minimum lead time allows.
    LeadTime,
    /// One-time orders are not delivered on the candidate's weekday.
    WeekdayNotAvailable,
    /// Subscriptions deliver only on the designated weekday.
    NotSubscriptionWeekday,
    /// Candidate is the designated weekday, but an instance of it that is
    /// no longer reachable under the cutoff/lead rules.
    BeforeNextSubscriptionSlot,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DenyReason::MissingDate => "Please select a delivery date.",
            DenyReason::SameDay => "Same-day delivery is not available.",
            DenyReason::AfterCutoff => {
                "Orders placed after the daily cutoff cannot be delivered next day."
            }
            DenyReason::PastDate => "Delivery date must be in the future.",
            DenyReason::LeadTime => "This date is too soon for delivery preparation.",
            DenyReason::WeekdayNotAvailable => "We do not deliver on this weekday.",
            DenyReason::NotSubscriptionWeekday => {
                "Subscription deliveries are only available on the scheduled weekday."
            }
            DenyReason::BeforeNextSubscriptionSlot => {
                "This week's delivery slot has closed; please pick the next one."
            }
        };
        f.write_str(msg)
    }
}

/// The outcome of a delivery-date eligibility check, published to the UI.
///
/// Produced fresh for each query — never cache one, it depends on "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DateDecision {
    pub allowed: bool,
    pub reason: Option<DenyReason>,
}

impl DateDecision {
    /// An allow decision.
    pub const fn allow() -> Self {
        DateDecision {
            allowed: true,
            reason: None,
        }
    }

    /// A deny decision with the given reason.
    pub const fn deny(reason: DenyReason) -> Self {
        DateDecision {
            allowed: false,
            reason: Some(reason),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_total() {
        let item = LineItem::new(650, 3);
        assert_eq!(item.line_total().cents(), 1950);
    }

    #[test]
    fn test_empty_breakdown_is_all_zero() {
        let b = PriceBreakdown::empty();
        assert_eq!(b.subtotal_cents, 0);
        assert_eq!(b.total_cents, 0);
        assert!(!b.quantity_discount.applied);
        assert!(!b.delivery_fee.waived);
    }

    #[test]
    fn test_date_decision_constructors() {
        assert!(DateDecision::allow().allowed);
        assert_eq!(DateDecision::allow().reason, None);

        let denied = DateDecision::deny(DenyReason::SameDay);
        assert!(!denied.allowed);
        assert_eq!(denied.reason, Some(DenyReason::SameDay));
    }

    #[test]
    fn test_deny_reasons_are_distinct_messages() {
        // The cutoff denial must be distinguishable from the generic
        // past/future-date denial in user-visible text.
        assert_ne!(
            DenyReason::AfterCutoff.to_string(),
            DenyReason::PastDate.to_string()
        );
    }

    #[test]
    fn test_breakdown_serializes_camel_case() {
        let json = serde_json::to_value(PriceBreakdown::empty()).unwrap();
        assert!(json.get("subtotalCents").is_some());
        assert!(json.get("quantityDiscount").is_some());
        assert!(json.get("deliveryFee").is_some());
    }
}
