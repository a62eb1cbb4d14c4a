//! # In-Memory Checkout Service
//!
//! A process-local [`CheckoutService`] implementation with the same
//! observable contract as the real storefront API: opaque handles, line
//! merging by variant, completion, and injectable failures. Used by the
//! coordinator tests and by local development hosts that have no network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::service::{
    CartLookup, CheckoutError, CheckoutService, LineItemInput, LineItemUpdate, RemoteCart,
    RemoteLineItem,
};

// =============================================================================
// In-Memory Checkout
// =============================================================================

/// In-memory stand-in for the external Checkout Service.
#[derive(Debug, Default)]
pub struct InMemoryCheckout {
    carts: Mutex<HashMap<String, RemoteCart>>,
    fail_next: AtomicBool,
}

impl InMemoryCheckout {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the NEXT service call fail with `Unavailable`, then recovers.
    pub fn fail_next_request(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Marks a cart's checkout as completed (simulates the customer paying).
    pub fn complete_cart(&self, handle: &str) {
        if let Some(cart) = self.carts.lock().expect("cart map poisoned").get_mut(handle) {
            cart.completed_at = Some(Utc::now());
        }
    }

    /// Forgets a cart entirely (simulates handle expiry on the service side).
    pub fn drop_cart(&self, handle: &str) {
        self.carts.lock().expect("cart map poisoned").remove(handle);
    }

    fn take_injected_failure(&self) -> Result<(), CheckoutError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(CheckoutError::Unavailable("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    /// Runs a mutation against an open cart, enforcing handle and
    /// completion checks the way the real service does.
    fn with_open_cart<F>(&self, handle: &str, mutate: F) -> Result<RemoteCart, CheckoutError>
    where
        F: FnOnce(&mut RemoteCart) -> Result<(), CheckoutError>,
    {
        let mut carts = self.carts.lock().expect("cart map poisoned");
        let cart = carts
            .get_mut(handle)
            .ok_or_else(|| CheckoutError::UnknownHandle(handle.to_string()))?;
        if cart.is_completed() {
            return Err(CheckoutError::Rejected(
                "cart checkout already completed".to_string(),
            ));
        }
        mutate(cart)?;
        Ok(cart.clone())
    }
}

#[async_trait]
impl CheckoutService for InMemoryCheckout {
    async fn create_cart(&self) -> Result<RemoteCart, CheckoutError> {
        self.take_injected_failure()?;

        let id = Uuid::new_v4().to_string();
        let cart = RemoteCart {
            web_url: format!("https://checkout.example/{id}"),
            id: id.clone(),
            line_items: Vec::new(),
            completed_at: None,
        };
        self.carts
            .lock()
            .expect("cart map poisoned")
            .insert(id, cart.clone());
        Ok(cart)
    }

    async fn fetch_cart(&self, handle: &str) -> Result<CartLookup, CheckoutError> {
        self.take_injected_failure()?;

        let carts = self.carts.lock().expect("cart map poisoned");
        Ok(match carts.get(handle) {
            None => CartLookup::NotFound,
            Some(cart) if cart.is_completed() => CartLookup::Completed,
            Some(cart) => CartLookup::Found(cart.clone()),
        })
    }

    async fn add_line_items(
        &self,
        handle: &str,
        items: Vec<LineItemInput>,
    ) -> Result<RemoteCart, CheckoutError> {
        self.take_injected_failure()?;

        self.with_open_cart(handle, |cart| {
            for item in items {
                // Same variant merges into one line, like the real service.
                if let Some(line) = cart
                    .line_items
                    .iter_mut()
                    .find(|l| l.variant_ref == item.variant_ref)
                {
                    line.quantity += item.quantity;
                } else {
                    cart.line_items.push(RemoteLineItem {
                        id: Uuid::new_v4().to_string(),
                        quantity: item.quantity,
                        variant_ref: item.variant_ref,
                        custom_attributes: item.custom_attributes,
                    });
                }
            }
            Ok(())
        })
    }

    async fn update_line_items(
        &self,
        handle: &str,
        updates: Vec<LineItemUpdate>,
    ) -> Result<RemoteCart, CheckoutError> {
        self.take_injected_failure()?;

        self.with_open_cart(handle, |cart| {
            for update in updates {
                let line = cart
                    .line_items
                    .iter_mut()
                    .find(|l| l.id == update.line_item_id)
                    .ok_or_else(|| {
                        CheckoutError::Rejected(format!(
                            "unknown line item: {}",
                            update.line_item_id
                        ))
                    })?;
                line.quantity = update.quantity;
            }
            // Quantity zero removes the line, matching the real API.
            cart.line_items.retain(|l| l.quantity > 0);
            Ok(())
        })
    }

    async fn remove_line_items(
        &self,
        handle: &str,
        line_item_ids: Vec<String>,
    ) -> Result<RemoteCart, CheckoutError> {
        self.take_injected_failure()?;

        self.with_open_cart(handle, |cart| {
            cart.line_items.retain(|l| !line_item_ids.contains(&l.id));
            Ok(())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::CustomAttribute;

    fn input(variant_ref: &str, quantity: i64) -> LineItemInput {
        LineItemInput {
            variant_ref: variant_ref.to_string(),
            quantity,
            custom_attributes: vec![CustomAttribute {
                key: "sweetness".to_string(),
                value: "regular".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_add_merges_same_variant() {
        let service = InMemoryCheckout::new();
        let cart = service.create_cart().await.unwrap();

        service
            .add_line_items(&cart.id, vec![input("v1", 2)])
            .await
            .unwrap();
        let cart = service
            .add_line_items(&cart.id, vec![input("v1", 3)])
            .await
            .unwrap();

        assert_eq!(cart.line_items.len(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_line() {
        let service = InMemoryCheckout::new();
        let cart = service.create_cart().await.unwrap();
        let cart = service
            .add_line_items(&cart.id, vec![input("v1", 2)])
            .await
            .unwrap();
        let line_id = cart.line_items[0].id.clone();

        let cart = service
            .update_line_items(
                &cart.id,
                vec![LineItemUpdate {
                    line_item_id: line_id,
                    quantity: 0,
                }],
            )
            .await
            .unwrap();
        assert!(cart.line_items.is_empty());
    }

    #[tokio::test]
    async fn test_completed_cart_rejects_mutation() {
        let service = InMemoryCheckout::new();
        let cart = service.create_cart().await.unwrap();
        service.complete_cart(&cart.id);

        let err = service
            .add_line_items(&cart.id, vec![input("v1", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Rejected(_)));

        let lookup = service.fetch_cart(&cart.id).await.unwrap();
        assert!(matches!(lookup, CartLookup::Completed));
    }

    #[tokio::test]
    async fn test_dropped_cart_is_not_found() {
        let service = InMemoryCheckout::new();
        let cart = service.create_cart().await.unwrap();
        service.drop_cart(&cart.id);

        let lookup = service.fetch_cart(&cart.id).await.unwrap();
        assert!(matches!(lookup, CartLookup::NotFound));
    }

    #[tokio::test]
    async fn test_injected_failure_fires_once() {
        let service = InMemoryCheckout::new();
        service.fail_next_request();

        assert!(service.create_cart().await.is_err());
        assert!(service.create_cart().await.is_ok());
    }
}
