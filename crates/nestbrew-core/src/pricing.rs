//! # Pricing Module
//!
//! The Discount & Total Calculator: turns a list of line items plus
//! order-level flags into a fully itemized, exactly reproducible
//! `PriceBreakdown`.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Total Pipeline                               │
//! │                                                                         │
//! │  line items ──► subtotal = Σ(unit_price × qty)                         │
//! │                     │                                                   │
//! │                     ├──► quantity discount  (best qualifying tier)     │
//! │                     ├──► subscription discount (plan lookup)           │
//! │                     │        both against the ORIGINAL subtotal,       │
//! │                     │        additive, never compounded                │
//! │                     ▼                                                   │
//! │         subtotal_after_discounts                                       │
//! │                     │                                                   │
//! │                     ├──► delivery fee (waived iff post-discount        │
//! │                     │    subtotal >= threshold)                        │
//! │                     ▼                                                   │
//! │         tax on (subtotal_after_discounts + fee)                        │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │         total = subtotal_after_discounts + fee + tax                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Order
//! Every component is an integer cent amount produced by exactly one
//! rounding (inside `RateBps::amount_of`). The total is the SUM of rounded
//! components — never a separately rounded raw sum — so two implementations
//! that follow this order reproduce cent-level output exactly.
//!
//! Pure functions, no side effects; suitable for property-based testing.

use crate::config::StorefrontConfig;
use crate::money::Money;
use crate::types::{
    DeliveryFeeLine, DiscountLine, FreeDeliveryProgress, LineItem, PriceBreakdown,
    QuantityDiscountTier,
};

// =============================================================================
// Order Total
// =============================================================================

/// Computes a fully itemized order total.
///
/// ## Arguments
/// * `config` - storefront configuration (tiers, plans, tax, threshold)
/// * `line_items` - cart lines; empty yields an all-zero breakdown
/// * `subscription_plan_id` - plan to price, if the purchase is recurring;
///   an unknown id or a zero-rate plan yields a zero, not-applied discount
/// * `requires_delivery` - false skips the fee entirely (amount 0, NOT waived)
/// * `apply_tax` - false zeroes the tax line
///
/// ## Edge Cases
/// - Zero line items: subtotal 0 and a zero breakdown, no error
/// - Both discounts may apply simultaneously; they are subtracted from the
///   same original subtotal (additive stacking)
/// - The fee waiver compares the POST-discount subtotal against the
///   threshold, a deliberate policy choice
pub fn compute_order_total(
    config: &StorefrontConfig,
    line_items: &[LineItem],
    subscription_plan_id: Option<&str>,
    requires_delivery: bool,
    apply_tax: bool,
) -> PriceBreakdown {
    if line_items.is_empty() {
        return PriceBreakdown::empty();
    }

    let subtotal: Money = line_items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.line_total());
    let total_quantity: i64 = line_items.iter().map(|i| i.quantity).sum();

    let quantity_discount = quantity_discount_for(&config.quantity_tiers, total_quantity, subtotal);
    let subscription_discount = subscription_discount_for(config, subscription_plan_id, subtotal);

    let after_discounts =
        subtotal - quantity_discount.amount() - subscription_discount.amount();

    let delivery_fee = delivery_fee_for(config, after_discounts, requires_delivery);

    let tax = if apply_tax {
        config
            .tax_rate_bps
            .amount_of(after_discounts + delivery_fee.amount())
    } else {
        Money::zero()
    };

    let total = after_discounts + delivery_fee.amount() + tax;

    PriceBreakdown {
        subtotal_cents: subtotal.cents(),
        quantity_discount,
        subscription_discount,
        subtotal_after_discounts_cents: after_discounts.cents(),
        delivery_fee,
        tax_cents: tax.cents(),
        total_cents: total.cents(),
        total_quantity,
    }
}

/// Selects the quantity discount line for a cart.
///
/// Among all tiers whose `min_quantity <= total_quantity`, the one with the
/// LARGEST discount rate wins — not the largest `min_quantity`. The tier
/// table is not assumed sorted, and discount size is not assumed monotonic
/// with quantity.
fn quantity_discount_for(
    tiers: &[QuantityDiscountTier],
    total_quantity: i64,
    subtotal: Money,
) -> DiscountLine {
    let best = tiers
        .iter()
        .filter(|t| t.min_quantity <= total_quantity)
        .max_by_key(|t| t.discount_bps.bps());

    match best {
        Some(tier) if !tier.discount_bps.is_zero() => DiscountLine {
            amount_cents: tier.discount_bps.amount_of(subtotal).cents(),
            rate_bps: tier.discount_bps,
            applied: true,
        },
        _ => DiscountLine::none(),
    }
}

/// Looks up the subscription discount line for a plan id.
///
/// Unknown ids and zero-rate plans are defined no-effect inputs, not errors.
fn subscription_discount_for(
    config: &StorefrontConfig,
    plan_id: Option<&str>,
    subtotal: Money,
) -> DiscountLine {
    let plan = plan_id.and_then(|id| config.subscription_plan(id));

    match plan {
        Some(plan) if !plan.discount_bps.is_zero() => DiscountLine {
            amount_cents: plan.discount_bps.amount_of(subtotal).cents(),
            rate_bps: plan.discount_bps,
            applied: true,
        },
        _ => DiscountLine::none(),
    }
}

/// Decides the delivery fee line.
///
/// `waived` is true only when delivery was required AND the post-discount
/// subtotal met the threshold; a pickup order reports `waived: false` with
/// amount 0 so the UI never shows "free delivery" on a non-delivery order.
fn delivery_fee_for(
    config: &StorefrontConfig,
    after_discounts: Money,
    requires_delivery: bool,
) -> DeliveryFeeLine {
    if !requires_delivery {
        return DeliveryFeeLine {
            amount_cents: 0,
            waived: false,
        };
    }

    if after_discounts >= config.free_delivery_threshold() {
        DeliveryFeeLine {
            amount_cents: 0,
            waived: true,
        }
    } else {
        DeliveryFeeLine {
            amount_cents: config.delivery_fee_cents,
            waived: false,
        }
    }
}

// =============================================================================
// Free Delivery Progress
// =============================================================================

/// Computes "spend $X more for free delivery" progress for the UI.
///
/// `remaining` is clamped at 0 and `percentage` at 100 once qualified.
pub fn free_delivery_progress(
    config: &StorefrontConfig,
    current_subtotal: Money,
) -> FreeDeliveryProgress {
    let threshold = config.free_delivery_threshold();
    let qualified = current_subtotal >= threshold;
    let remaining = (threshold - current_subtotal).clamp_non_negative();

    let percentage = if threshold.is_zero() || qualified {
        100
    } else {
        // Integer percent, truncated; 100 is only reported once qualified.
        ((current_subtotal.cents().max(0) as i128 * 100) / threshold.cents() as i128) as u32
    };

    FreeDeliveryProgress {
        threshold_cents: threshold.cents(),
        remaining_cents: remaining.cents(),
        percentage: percentage.min(100),
        qualified,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::RateBps;
    use crate::types::SubscriptionPlan;

    /// Threshold $50, fee $5, tax 9%, tiers 6+ => 3%, 10+ => 5%.
    fn config() -> StorefrontConfig {
        StorefrontConfig::default()
    }

    fn items(unit_price_cents: i64, quantity: i64) -> Vec<LineItem> {
        vec![LineItem::new(unit_price_cents, quantity)]
    }

    #[test]
    fn test_empty_cart_is_zero_breakdown() {
        let breakdown = compute_order_total(&config(), &[], None, true, true);
        assert_eq!(breakdown, PriceBreakdown::empty());
    }

    /// The worked scenario: 12 units at $6.00, tier {10, 5%}, threshold $50.
    #[test]
    fn test_twelve_cups_scenario() {
        let breakdown = compute_order_total(&config(), &items(600, 12), None, true, true);

        assert_eq!(breakdown.subtotal_cents, 7200); // $72.00
        assert_eq!(breakdown.total_quantity, 12);
        assert!(breakdown.quantity_discount.applied);
        assert_eq!(breakdown.quantity_discount.rate_bps.bps(), 500);
        assert_eq!(breakdown.quantity_discount.amount_cents, 360); // $3.60
        assert_eq!(breakdown.subtotal_after_discounts_cents, 6840); // $68.40
        assert!(breakdown.delivery_fee.waived);
        assert_eq!(breakdown.delivery_fee.amount_cents, 0);
        // 9% of $68.40 = $6.156 → $6.16
        assert_eq!(breakdown.tax_cents, 616);
        assert_eq!(breakdown.total_cents, 6840 + 616);
    }

    #[test]
    fn test_breakdown_invariants_hold() {
        let breakdown = compute_order_total(
            &config(),
            &[LineItem::new(650, 3), LineItem::new(600, 4)],
            Some("weekly-1"),
            true,
            true,
        );

        assert_eq!(
            breakdown.subtotal_after_discounts_cents,
            breakdown.subtotal_cents
                - breakdown.quantity_discount.amount_cents
                - breakdown.subscription_discount.amount_cents
        );
        assert_eq!(
            breakdown.total_cents,
            breakdown.subtotal_after_discounts_cents
                + breakdown.delivery_fee.amount_cents
                + breakdown.tax_cents
        );
    }

    #[test]
    fn test_best_rate_wins_not_highest_min_quantity() {
        // Deliberately non-monotonic table: a 12+ tier with a WORSE rate
        // than the 10+ tier. 15 units qualify for both; 5% must win.
        let mut config = config();
        config.quantity_tiers = vec![
            QuantityDiscountTier {
                min_quantity: 10,
                discount_bps: RateBps::from_bps(500),
            },
            QuantityDiscountTier {
                min_quantity: 12,
                discount_bps: RateBps::from_bps(200),
            },
        ];

        let breakdown = compute_order_total(&config, &items(600, 15), None, true, true);
        assert_eq!(breakdown.quantity_discount.rate_bps.bps(), 500);
    }

    #[test]
    fn test_no_qualifying_tier_means_no_discount() {
        let breakdown = compute_order_total(&config(), &items(600, 2), None, true, true);
        assert!(!breakdown.quantity_discount.applied);
        assert_eq!(breakdown.quantity_discount.amount_cents, 0);
    }

    #[test]
    fn test_discount_amount_monotonic_across_tier_boundary() {
        // Increasing quantity at fixed unit price never shrinks the
        // absolute discount amount, including across the 6 → 10 boundary.
        let config = config();
        let mut last_discount = 0;
        for qty in 1..=14 {
            let breakdown = compute_order_total(&config, &items(600, qty), None, true, true);
            assert!(
                breakdown.quantity_discount.amount_cents >= last_discount,
                "discount inverted at quantity {qty}"
            );
            last_discount = breakdown.quantity_discount.amount_cents;
        }
    }

    #[test]
    fn test_unknown_plan_id_is_zero_discount() {
        let breakdown =
            compute_order_total(&config(), &items(600, 2), Some("no-such-plan"), true, true);
        assert!(!breakdown.subscription_discount.applied);
        assert_eq!(breakdown.subscription_discount.amount_cents, 0);
    }

    #[test]
    fn test_zero_rate_plan_is_not_applied() {
        let mut config = config();
        config.subscription_plans.push(SubscriptionPlan {
            id: "trial".to_string(),
            deliveries_per_week: 1,
            discount_bps: RateBps::zero(),
            min_duration_weeks: 1,
        });

        let breakdown = compute_order_total(&config, &items(600, 2), Some("trial"), true, true);
        assert!(!breakdown.subscription_discount.applied);
    }

    #[test]
    fn test_discounts_are_additive_against_original_subtotal() {
        // 12 × $6.00 with the weekly-3 plan: 5% quantity + 10% subscription,
        // both of $72.00 — $3.60 + $7.20, never 10% of the already-discounted
        // amount.
        let breakdown =
            compute_order_total(&config(), &items(600, 12), Some("weekly-3"), true, true);
        assert_eq!(breakdown.quantity_discount.amount_cents, 360);
        assert_eq!(breakdown.subscription_discount.amount_cents, 720);
        assert_eq!(breakdown.subtotal_after_discounts_cents, 7200 - 360 - 720);
    }

    #[test]
    fn test_fee_waiver_boundary_exact_and_one_cent_below() {
        let config = config(); // threshold $50.00

        // Post-discount subtotal exactly $50.00: waived.
        let at = compute_order_total(&config, &items(5000, 1), None, true, true);
        assert_eq!(at.subtotal_after_discounts_cents, 5000);
        assert!(at.delivery_fee.waived);
        assert_eq!(at.delivery_fee.amount_cents, 0);

        // One cent below: fee applies.
        let below = compute_order_total(&config, &items(4999, 1), None, true, true);
        assert_eq!(below.subtotal_after_discounts_cents, 4999);
        assert!(!below.delivery_fee.waived);
        assert_eq!(below.delivery_fee.amount_cents, 500);
    }

    #[test]
    fn test_waiver_checks_post_discount_subtotal() {
        // Raw subtotal $51.00 but the 3% discount (6 units) drops it to
        // $49.47 — below threshold, so the fee applies even though the raw
        // subtotal was above it.
        let breakdown = compute_order_total(&config(), &items(850, 6), None, true, true);
        assert_eq!(breakdown.subtotal_cents, 5100);
        assert_eq!(breakdown.subtotal_after_discounts_cents, 5100 - 153);
        assert!(!breakdown.delivery_fee.waived);
    }

    #[test]
    fn test_no_delivery_means_no_fee_and_not_waived() {
        let breakdown = compute_order_total(&config(), &items(600, 1), None, false, true);
        assert_eq!(breakdown.delivery_fee.amount_cents, 0);
        assert!(!breakdown.delivery_fee.waived);
    }

    #[test]
    fn test_tax_applies_to_post_discount_plus_fee() {
        // 2 × $6.00 = $12.00, no discounts, fee $5.00 → tax on $17.00.
        let breakdown = compute_order_total(&config(), &items(600, 2), None, true, true);
        assert_eq!(breakdown.delivery_fee.amount_cents, 500);
        // 9% of $17.00 = $1.53
        assert_eq!(breakdown.tax_cents, 153);
        assert_eq!(breakdown.total_cents, 1200 + 500 + 153);
    }

    #[test]
    fn test_tax_disabled() {
        let breakdown = compute_order_total(&config(), &items(600, 2), None, true, false);
        assert_eq!(breakdown.tax_cents, 0);
    }

    #[test]
    fn test_free_delivery_progress_below_threshold() {
        let progress = free_delivery_progress(&config(), Money::from_cents(2000));
        assert_eq!(progress.threshold_cents, 5000);
        assert_eq!(progress.remaining_cents, 3000);
        assert_eq!(progress.percentage, 40);
        assert!(!progress.qualified);
    }

    #[test]
    fn test_free_delivery_progress_clamps() {
        let progress = free_delivery_progress(&config(), Money::from_cents(9000));
        assert_eq!(progress.remaining_cents, 0);
        assert_eq!(progress.percentage, 100);
        assert!(progress.qualified);
    }

    #[test]
    fn test_free_delivery_progress_at_exact_threshold() {
        let progress = free_delivery_progress(&config(), Money::from_cents(5000));
        assert!(progress.qualified);
        assert_eq!(progress.remaining_cents, 0);
        assert_eq!(progress.percentage, 100);
    }
}
