//! # Variant Catalog
//!
//! Typed resolution of a product variant from the customer's selection.
//!
//! The storefront used to build a lookup key by concatenating option
//! strings ("subscription-large-less_sweet"), which made every typo a
//! runtime-only failure. Here the key is a typed composite —
//! purchase type × cup size × sweetness — resolved through a table, so an
//! invalid combination is either unrepresentable or an explicit `None`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;
use crate::types::PurchaseType;

// =============================================================================
// Selection Options
// =============================================================================

/// Cup size for a bottled beverage variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CupSize {
    /// 100ml tasting bottle.
    Small,
    /// 250ml regular bottle.
    Regular,
}

/// Sweetness level for a beverage variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SweetnessLevel {
    /// No added rock sugar.
    SugarFree,
    /// Reduced rock sugar.
    LessSweet,
    /// House standard.
    Regular,
}

// =============================================================================
// Variant Key & Table
// =============================================================================

/// Composite key identifying one sellable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantKey {
    pub purchase_type: PurchaseType,
    pub size: CupSize,
    pub sweetness: SweetnessLevel,
}

/// A resolved variant: the external service's opaque reference plus the
/// unit price used for local pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Opaque variant reference understood by the Checkout Service.
    pub variant_ref: String,
    /// Unit price in cents at catalog time.
    pub unit_price_cents: i64,
}

impl Variant {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// Static variant table, built from catalog data at startup.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    variants: HashMap<VariantKey, Variant>,
}

impl VariantTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        VariantTable {
            variants: HashMap::new(),
        }
    }

    /// Registers a variant under its composite key, replacing any previous
    /// entry for the same key.
    pub fn insert(&mut self, key: VariantKey, variant: Variant) {
        self.variants.insert(key, variant);
    }

    /// Resolves a selection to a variant. Combinations the catalog does not
    /// sell resolve to `None` — there is no string key to mistype.
    pub fn resolve(&self, key: &VariantKey) -> Option<&Variant> {
        self.variants.get(key)
    }

    /// Number of sellable variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the table has no variants.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(purchase_type: PurchaseType, size: CupSize, sweetness: SweetnessLevel) -> VariantKey {
        VariantKey {
            purchase_type,
            size,
            sweetness,
        }
    }

    #[test]
    fn test_resolve_known_variant() {
        let mut table = VariantTable::new();
        table.insert(
            key(PurchaseType::OneTime, CupSize::Regular, SweetnessLevel::Regular),
            Variant {
                variant_ref: "gid://variant/41".to_string(),
                unit_price_cents: 650,
            },
        );

        let variant = table
            .resolve(&key(
                PurchaseType::OneTime,
                CupSize::Regular,
                SweetnessLevel::Regular,
            ))
            .unwrap();
        assert_eq!(variant.unit_price().cents(), 650);
    }

    #[test]
    fn test_unsold_combination_resolves_to_none() {
        let mut table = VariantTable::new();
        table.insert(
            key(PurchaseType::OneTime, CupSize::Regular, SweetnessLevel::Regular),
            Variant {
                variant_ref: "gid://variant/41".to_string(),
                unit_price_cents: 650,
            },
        );

        // Same size/sweetness under a subscription is a different variant
        // and is not registered here.
        assert!(table
            .resolve(&key(
                PurchaseType::Subscription,
                CupSize::Regular,
                SweetnessLevel::Regular,
            ))
            .is_none());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut table = VariantTable::new();
        let k = key(PurchaseType::OneTime, CupSize::Small, SweetnessLevel::SugarFree);
        table.insert(
            k,
            Variant {
                variant_ref: "v1".to_string(),
                unit_price_cents: 450,
            },
        );
        table.insert(
            k,
            Variant {
                variant_ref: "v1".to_string(),
                unit_price_cents: 480,
            },
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve(&k).unwrap().unit_price_cents, 480);
    }
}
