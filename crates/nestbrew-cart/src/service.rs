//! # Checkout Service Contract
//!
//! The consumed interface of the external Checkout Service: the
//! third-party storefront API that owns authoritative line items, the
//! variant catalog and checkout URL generation. This engine never talks to
//! it except through this trait, so the coordinator is testable with the
//! in-memory implementation in [`crate::memory`].
//!
//! ## Contract Notes
//! - A cart handle is OPAQUE: the coordinator stores and replays it, never
//!   inspects it.
//! - `fetch_cart` distinguishes "gone" from "completed" — both mean the
//!   remembered handle must be replaced, but completion is the expected
//!   steady-state after a checkout, not a failure.
//! - Timeout/retry policy belongs to the implementation behind this trait,
//!   not to the coordinator; the coordinator only guarantees that a failed
//!   mutation is a local no-op.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Wire Types
// =============================================================================

/// A key/value attribute attached to a line item (e.g. sweetness note,
/// requested delivery date) and passed through to the checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAttribute {
    pub key: String,
    pub value: String,
}

/// A line item as the Checkout Service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLineItem {
    /// Service-assigned line item id.
    pub id: String,
    /// Quantity on the remote cart.
    pub quantity: i64,
    /// Opaque variant reference (see nestbrew-core's variant catalog).
    pub variant_ref: String,
    /// Pass-through attributes.
    pub custom_attributes: Vec<CustomAttribute>,
}

/// The Checkout Service's view of a cart — the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCart {
    /// Opaque cart handle.
    pub id: String,
    /// Authoritative line items.
    pub line_items: Vec<RemoteLineItem>,
    /// Checkout redirect URL.
    pub web_url: String,
    /// Set once the checkout behind this cart has completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl RemoteCart {
    /// Total quantity across all line items (the UI's `itemCount`).
    pub fn total_quantity(&self) -> i64 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }

    /// Whether the checkout behind this cart already completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Outcome of resolving a remembered handle.
#[derive(Debug, Clone)]
pub enum CartLookup {
    /// Handle refers to an open cart.
    Found(RemoteCart),
    /// Service no longer knows the handle (expired / deleted).
    NotFound,
    /// Handle refers to an already-completed checkout.
    Completed,
}

/// Input for adding a line to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub variant_ref: String,
    pub quantity: i64,
    pub custom_attributes: Vec<CustomAttribute>,
}

/// Input for changing the quantity of an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemUpdate {
    pub line_item_id: String,
    pub quantity: i64,
}

// =============================================================================
// Errors
// =============================================================================

/// Failures surfaced by a Checkout Service implementation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The service could not be reached or timed out.
    #[error("checkout service unavailable: {0}")]
    Unavailable(String),

    /// The service understood the request and refused it.
    #[error("checkout service rejected the request: {0}")]
    Rejected(String),

    /// A mutation referenced a handle the service does not know.
    #[error("unknown cart handle: {0}")]
    UnknownHandle(String),
}

// =============================================================================
// Service Trait
// =============================================================================

/// The external Checkout Service seam.
///
/// Passed into the coordinator explicitly (dependency injection) — there is
/// no process-wide client singleton to set up or tear down.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Creates a new, empty cart and returns it (with a fresh handle).
    async fn create_cart(&self) -> Result<RemoteCart, CheckoutError>;

    /// Resolves a remembered handle.
    async fn fetch_cart(&self, handle: &str) -> Result<CartLookup, CheckoutError>;

    /// Adds line items; returns the full reconciled cart.
    async fn add_line_items(
        &self,
        handle: &str,
        items: Vec<LineItemInput>,
    ) -> Result<RemoteCart, CheckoutError>;

    /// Updates line item quantities; returns the full reconciled cart.
    async fn update_line_items(
        &self,
        handle: &str,
        updates: Vec<LineItemUpdate>,
    ) -> Result<RemoteCart, CheckoutError>;

    /// Removes line items by id; returns the full reconciled cart.
    async fn remove_line_items(
        &self,
        handle: &str,
        line_item_ids: Vec<String>,
    ) -> Result<RemoteCart, CheckoutError>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_quantity_sums_lines() {
        let cart = RemoteCart {
            id: "cart-1".to_string(),
            line_items: vec![
                RemoteLineItem {
                    id: "l1".to_string(),
                    quantity: 2,
                    variant_ref: "v1".to_string(),
                    custom_attributes: vec![],
                },
                RemoteLineItem {
                    id: "l2".to_string(),
                    quantity: 3,
                    variant_ref: "v2".to_string(),
                    custom_attributes: vec![],
                },
            ],
            web_url: "https://checkout.example/cart-1".to_string(),
            completed_at: None,
        };

        assert_eq!(cart.total_quantity(), 5);
        assert!(!cart.is_completed());
    }

    #[test]
    fn test_wire_types_serialize_camel_case() {
        let input = LineItemInput {
            variant_ref: "gid://variant/41".to_string(),
            quantity: 2,
            custom_attributes: vec![CustomAttribute {
                key: "sweetness".to_string(),
                value: "less_sweet".to_string(),
            }],
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("variantRef").is_some());
        assert!(json.get("customAttributes").is_some());
    }
}
