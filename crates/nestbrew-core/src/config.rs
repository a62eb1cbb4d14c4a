//! # Storefront Configuration
//!
//! Externally supplied, hot-swappable configuration: discount tiers,
//! subscription plans, delivery policy, tax rate, free-delivery threshold
//! and currency. All of it is INPUT DATA, not behavior — the pricing and
//! delivery entry points take it by reference, so swapping a config file
//! changes decisions without a code change.
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! currency = "SGD"
//! tax_rate_bps = 900                    # 9% GST
//! delivery_fee_cents = 500              # $5.00 flat fee
//! free_delivery_threshold_cents = 5000  # waived at $50.00 post-discount
//!
//! [[quantity_tiers]]
//! min_quantity = 6
//! discount_bps = 300                    # 3% at 6+ cups
//!
//! [[quantity_tiers]]
//! min_quantity = 10
//! discount_bps = 500                    # 5% at 10+ cups
//!
//! [[subscription_plans]]
//! id = "weekly-1"
//! deliveries_per_week = 1
//! discount_bps = 500
//! min_duration_weeks = 4
//!
//! [delivery]
//! min_lead_days = 1
//! cutoff_hour = 20                      # 8pm local forfeits next-day
//! one_time_weekdays = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
//! subscription_weekday = "wed"
//! ```
//!
//! ## Parse Then Validate
//! TOML deserializes into raw structs first (weekdays as strings), then
//! `from_toml_str` validates everything into typed values. A config that
//! parses but violates a range rule is rejected at load time, never at
//! checkout time.

use chrono::Weekday;
use serde::Deserialize;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, RateBps};
use crate::types::{QuantityDiscountTier, SubscriptionPlan};

// =============================================================================
// Delivery Policy
// =============================================================================

/// Immutable delivery policy: lead time, cutoff and weekday restrictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Minimum days between order placement and delivery (>= 1).
    pub min_lead_days: i64,
    /// Local hour (24h) after which next-day delivery is forfeited.
    pub cutoff_hour: u32,
    /// Weekdays on which one-time orders may be delivered.
    pub one_time_weekdays: Vec<Weekday>,
    /// The single weekday on which subscriptions are delivered.
    pub subscription_weekday: Weekday,
}

impl DeliveryPolicy {
    /// Whether one-time orders are delivered on the given weekday.
    pub fn delivers_one_time_on(&self, weekday: Weekday) -> bool {
        self.one_time_weekdays.contains(&weekday)
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        DeliveryPolicy {
            min_lead_days: 1,
            cutoff_hour: 20,
            one_time_weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            subscription_weekday: Weekday::Wed,
        }
    }
}

// =============================================================================
// Storefront Configuration
// =============================================================================

/// Complete storefront configuration surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// ISO currency code, display-only (all math is in cents).
    pub currency: String,
    /// Tax rate in basis points, applied post-discount, post-fee.
    pub tax_rate_bps: RateBps,
    /// Flat per-order delivery fee in cents.
    pub delivery_fee_cents: i64,
    /// Post-discount subtotal at/above which the fee is waived.
    pub free_delivery_threshold_cents: i64,
    /// Quantity discount tier table. Unordered; best rate wins.
    pub quantity_tiers: Vec<QuantityDiscountTier>,
    /// Subscription plan table, looked up by plan id.
    pub subscription_plans: Vec<SubscriptionPlan>,
    /// Delivery calendar policy.
    pub delivery: DeliveryPolicy,
}

impl StorefrontConfig {
    /// Parses and validates a TOML configuration document.
    ///
    /// ## Errors
    /// - `CoreError::ConfigParse` when the TOML is malformed
    /// - `CoreError::InvalidWeekday` for unparseable weekday names
    /// - `CoreError::Validation` for out-of-range values
    pub fn from_toml_str(raw: &str) -> CoreResult<Self> {
        let raw: RawConfig =
            toml::from_str(raw).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        raw.into_config()
    }

    /// Looks up a subscription plan by id.
    pub fn subscription_plan(&self, id: &str) -> Option<&SubscriptionPlan> {
        self.subscription_plans.iter().find(|p| p.id == id)
    }

    /// Returns the delivery fee as Money.
    #[inline]
    pub fn delivery_fee(&self) -> Money {
        Money::from_cents(self.delivery_fee_cents)
    }

    /// Returns the free-delivery threshold as Money.
    #[inline]
    pub fn free_delivery_threshold(&self) -> Money {
        Money::from_cents(self.free_delivery_threshold_cents)
    }

    /// Cross-field validation, applied after parsing and to hand-built
    /// configs in tests.
    pub fn validate(&self) -> CoreResult<()> {
        if self.currency.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "currency".to_string(),
            }
            .into());
        }
        validate_rate("tax_rate_bps", self.tax_rate_bps)?;
        validate_non_negative_cents("delivery_fee_cents", self.delivery_fee_cents)?;
        validate_non_negative_cents(
            "free_delivery_threshold_cents",
            self.free_delivery_threshold_cents,
        )?;
        for tier in &self.quantity_tiers {
            if tier.min_quantity < 1 {
                return Err(ValidationError::MustBePositive {
                    field: "quantity tier min_quantity".to_string(),
                }
                .into());
            }
            validate_rate("quantity tier discount_bps", tier.discount_bps)?;
        }
        for plan in &self.subscription_plans {
            if plan.id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "subscription plan id".to_string(),
                }
                .into());
            }
            if plan.deliveries_per_week < 1 {
                return Err(ValidationError::MustBePositive {
                    field: "deliveries_per_week".to_string(),
                }
                .into());
            }
            validate_rate("subscription plan discount_bps", plan.discount_bps)?;
        }
        if self.delivery.min_lead_days < 1 {
            return Err(ValidationError::MustBePositive {
                field: "min_lead_days".to_string(),
            }
            .into());
        }
        if self.delivery.cutoff_hour > 23 {
            return Err(ValidationError::OutOfRange {
                field: "cutoff_hour".to_string(),
                min: 0,
                max: 23,
            }
            .into());
        }
        if self.delivery.one_time_weekdays.is_empty() {
            return Err(ValidationError::Required {
                field: "one_time_weekdays".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Default configuration carries the shipped storefront values so tests
/// and local development need no config file.
impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            currency: "SGD".to_string(),
            tax_rate_bps: RateBps::from_bps(900),
            delivery_fee_cents: 500,
            free_delivery_threshold_cents: 5000,
            quantity_tiers: vec![
                QuantityDiscountTier {
                    min_quantity: 6,
                    discount_bps: RateBps::from_bps(300),
                },
                QuantityDiscountTier {
                    min_quantity: 10,
                    discount_bps: RateBps::from_bps(500),
                },
            ],
            subscription_plans: vec![
                SubscriptionPlan {
                    id: "weekly-1".to_string(),
                    deliveries_per_week: 1,
                    discount_bps: RateBps::from_bps(500),
                    min_duration_weeks: 4,
                },
                SubscriptionPlan {
                    id: "weekly-3".to_string(),
                    deliveries_per_week: 3,
                    discount_bps: RateBps::from_bps(1000),
                    min_duration_weeks: 4,
                },
            ],
            delivery: DeliveryPolicy::default(),
        }
    }
}

// =============================================================================
// Raw (Untyped) Configuration
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawConfig {
    currency: String,
    tax_rate_bps: u32,
    delivery_fee_cents: i64,
    free_delivery_threshold_cents: i64,
    #[serde(default)]
    quantity_tiers: Vec<RawTier>,
    #[serde(default)]
    subscription_plans: Vec<RawPlan>,
    delivery: RawDelivery,
}

#[derive(Debug, Deserialize)]
struct RawTier {
    min_quantity: i64,
    discount_bps: u32,
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    id: String,
    deliveries_per_week: u32,
    discount_bps: u32,
    min_duration_weeks: u32,
}

#[derive(Debug, Deserialize)]
struct RawDelivery {
    min_lead_days: i64,
    cutoff_hour: u32,
    one_time_weekdays: Vec<String>,
    subscription_weekday: String,
}

impl RawConfig {
    fn into_config(self) -> CoreResult<StorefrontConfig> {
        let one_time_weekdays = self
            .delivery
            .one_time_weekdays
            .iter()
            .map(|s| parse_weekday(s))
            .collect::<CoreResult<Vec<_>>>()?;

        let config = StorefrontConfig {
            currency: self.currency,
            tax_rate_bps: RateBps::from_bps(self.tax_rate_bps),
            delivery_fee_cents: self.delivery_fee_cents,
            free_delivery_threshold_cents: self.free_delivery_threshold_cents,
            quantity_tiers: self
                .quantity_tiers
                .into_iter()
                .map(|t| QuantityDiscountTier {
                    min_quantity: t.min_quantity,
                    discount_bps: RateBps::from_bps(t.discount_bps),
                })
                .collect(),
            subscription_plans: self
                .subscription_plans
                .into_iter()
                .map(|p| SubscriptionPlan {
                    id: p.id,
                    deliveries_per_week: p.deliveries_per_week,
                    discount_bps: RateBps::from_bps(p.discount_bps),
                    min_duration_weeks: p.min_duration_weeks,
                })
                .collect(),
            delivery: DeliveryPolicy {
                min_lead_days: self.delivery.min_lead_days,
                cutoff_hour: self.delivery.cutoff_hour,
                one_time_weekdays,
                subscription_weekday: parse_weekday(&self.delivery.subscription_weekday)?,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parses a weekday name ("wed", "Wednesday", case-insensitive).
fn parse_weekday(s: &str) -> CoreResult<Weekday> {
    Weekday::from_str(s.trim()).map_err(|_| CoreError::InvalidWeekday(s.to_string()))
}

/// Bps rates cap at 100%.
fn validate_rate(field: &str, rate: RateBps) -> CoreResult<()> {
    if rate.bps() > RateBps::MAX_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: RateBps::MAX_BPS as i64,
        }
        .into());
    }
    Ok(())
}

fn validate_non_negative_cents(field: &str, cents: i64) -> CoreResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        currency = "SGD"
        tax_rate_bps = 900
        delivery_fee_cents = 500
        free_delivery_threshold_cents = 5000

        [[quantity_tiers]]
        min_quantity = 10
        discount_bps = 500

        [[subscription_plans]]
        id = "weekly-1"
        deliveries_per_week = 1
        discount_bps = 500
        min_duration_weeks = 4

        [delivery]
        min_lead_days = 1
        cutoff_hour = 20
        one_time_weekdays = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"]
        subscription_weekday = "wed"
    "#;

    #[test]
    fn test_parses_sample_config() {
        let config = StorefrontConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.currency, "SGD");
        assert_eq!(config.tax_rate_bps.bps(), 900);
        assert_eq!(config.quantity_tiers.len(), 1);
        assert_eq!(config.delivery.subscription_weekday, Weekday::Wed);
        assert_eq!(config.delivery.one_time_weekdays.len(), 7);
    }

    #[test]
    fn test_plan_lookup() {
        let config = StorefrontConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.subscription_plan("weekly-1").is_some());
        assert!(config.subscription_plan("no-such-plan").is_none());
    }

    #[test]
    fn test_rejects_bad_weekday() {
        let bad = SAMPLE.replace("\"wed\"", "\"someday\"");
        let err = StorefrontConfig::from_toml_str(&bad).unwrap_err();
        assert!(matches!(err, CoreError::InvalidWeekday(_)));
    }

    #[test]
    fn test_rejects_out_of_range_cutoff() {
        let bad = SAMPLE.replace("cutoff_hour = 20", "cutoff_hour = 24");
        let err = StorefrontConfig::from_toml_str(&bad).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_rejects_rate_over_100_percent() {
        let bad = SAMPLE.replace("discount_bps = 500", "discount_bps = 10500");
        assert!(StorefrontConfig::from_toml_str(&bad).is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = StorefrontConfig::from_toml_str("currency = ").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn test_default_config_is_valid() {
        StorefrontConfig::default().validate().unwrap();
    }
}
