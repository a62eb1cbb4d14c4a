//! # Cart/Session Coordinator
//!
//! Maintains a single logical cart per customer session, backed by the
//! external Checkout Service, and republishes count/line-item state to the
//! presentation layer.
//!
//! ## Session State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Session Lifecycle                              │
//! │                                                                         │
//! │  ┌──────────────┐  initialize()  ┌──────────────┐        ┌───────────┐ │
//! │  │Uninitialized │ ─────────────► │ Initializing │ ─────► │   Ready   │ │
//! │  └──────────────┘                └──────┬───────┘        └─────┬─────┘ │
//! │         ▲                               │                      │       │
//! │         │        service failure        │    remembered handle │       │
//! │         └───────────────────────────────┘    stale/completed:  │       │
//! │                                              create new cart   │       │
//! │                                              transparently ────┘       │
//! │                                                                         │
//! │  Mutations (add/update/remove/clear) require Ready; calling earlier    │
//! │  is a caller error (CartError::NotReady), never a silent queue.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Serialization
//! Every operation runs under ONE async mutex that is held across the
//! service round trip. Two mutations issued back-to-back (rapid clicks)
//! therefore execute strictly in order against the shared handle — a stale
//! response can never overwrite a newer one. This replaces the original
//! UI-level "disable the button while pending" convention with a
//! structural guarantee.
//!
//! ## Failure Semantics
//! A failed mutation is a local no-op: the cached snapshot is only replaced
//! by the service's reconciled cart on success, so the previous snapshot
//! survives any error untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use nestbrew_core::validation::validate_quantity;

use crate::error::{CartError, CartResult};
use crate::service::{
    CartLookup, CheckoutError, CheckoutService, CustomAttribute, LineItemInput, LineItemUpdate,
    RemoteCart, RemoteLineItem,
};
use crate::store::HandleStore;

// =============================================================================
// Cart Snapshot
// =============================================================================

/// The locally cached view of the remote cart, published to the UI.
///
/// Always a whole-cart replacement from the service's reconciled response —
/// never a partial or optimistic local edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Opaque cart handle at the Checkout Service.
    pub handle: String,
    /// Authoritative line items as last reported by the service.
    pub line_items: Vec<RemoteLineItem>,
    /// Σ(quantity) over line items — the UI's badge count.
    pub item_count: i64,
    /// Checkout redirect URL.
    pub web_url: String,
}

impl From<RemoteCart> for CartSnapshot {
    fn from(cart: RemoteCart) -> Self {
        CartSnapshot {
            item_count: cart.total_quantity(),
            handle: cart.id,
            line_items: cart.line_items,
            web_url: cart.web_url,
        }
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Coordinator state machine. `Initializing` is observable only through
/// `NotReady` errors, since the session mutex serializes all access.
#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Initializing,
    Ready(CartSnapshot),
}

// =============================================================================
// Cart Coordinator
// =============================================================================

/// Coordinates one cart session against the external Checkout Service.
///
/// Both collaborators are injected explicitly — no process-wide client
/// singleton — so the coordinator is testable with [`crate::memory`] and
/// [`crate::store::InMemoryHandleStore`].
pub struct CartCoordinator {
    service: Arc<dyn CheckoutService>,
    store: Arc<dyn HandleStore>,
    /// Single-flight lock: held across the service await on every operation.
    state: Mutex<SessionState>,
}

impl CartCoordinator {
    /// Creates an uninitialized coordinator.
    pub fn new(service: Arc<dyn CheckoutService>, store: Arc<dyn HandleStore>) -> Self {
        CartCoordinator {
            service,
            store,
            state: Mutex::new(SessionState::Uninitialized),
        }
    }

    /// Brings the session to `Ready`.
    ///
    /// Rehydrates the remembered handle when the service still has it open;
    /// a stale or completed handle is replaced by a fresh cart transparently
    /// (expected steady-state behavior, not an error). The winning handle is
    /// persisted, overwriting the old one. Idempotent once Ready.
    pub async fn initialize(&self) -> CartResult<CartSnapshot> {
        let mut state = self.state.lock().await;
        if let SessionState::Ready(snapshot) = &*state {
            return Ok(snapshot.clone());
        }
        *state = SessionState::Initializing;

        match self.resolve_or_create().await {
            Ok(cart) => {
                self.store.save(&cart.id);
                let snapshot = CartSnapshot::from(cart);
                info!(handle = %snapshot.handle, item_count = snapshot.item_count, "cart session ready");
                *state = SessionState::Ready(snapshot.clone());
                Ok(snapshot)
            }
            Err(err) => {
                *state = SessionState::Uninitialized;
                Err(err.into())
            }
        }
    }

    /// Resolves the remembered handle or creates a new cart.
    async fn resolve_or_create(&self) -> Result<RemoteCart, CheckoutError> {
        if let Some(handle) = self.store.load() {
            match self.service.fetch_cart(&handle).await? {
                CartLookup::Found(cart) if !cart.is_completed() => {
                    debug!(handle = %handle, "resumed remembered cart");
                    return Ok(cart);
                }
                CartLookup::Found(_) | CartLookup::Completed => {
                    debug!(handle = %handle, "remembered cart already checked out; replacing");
                }
                CartLookup::NotFound => {
                    debug!(handle = %handle, "remembered handle stale; replacing");
                }
            }
        }
        self.service.create_cart().await
    }

    /// Adds a variant to the cart.
    pub async fn add_item(
        &self,
        variant_ref: &str,
        quantity: i64,
        attributes: Vec<CustomAttribute>,
    ) -> CartResult<CartSnapshot> {
        validate_quantity(quantity)?;

        let mut state = self.state.lock().await;
        let handle = ready_handle(&state)?;
        debug!(variant_ref = %variant_ref, quantity, "add_item");

        let cart = self
            .service
            .add_line_items(
                &handle,
                vec![LineItemInput {
                    variant_ref: variant_ref.to_string(),
                    quantity,
                    custom_attributes: attributes,
                }],
            )
            .await?;
        Ok(publish(&mut state, cart))
    }

    /// Sets the quantity of an existing line item; quantity 0 removes it.
    pub async fn update_quantity(
        &self,
        line_item_id: &str,
        quantity: i64,
    ) -> CartResult<CartSnapshot> {
        if quantity != 0 {
            validate_quantity(quantity)?;
        }

        let mut state = self.state.lock().await;
        let handle = ready_handle(&state)?;
        require_line_item(&state, line_item_id)?;
        debug!(line_item_id = %line_item_id, quantity, "update_quantity");

        let cart = if quantity == 0 {
            self.service
                .remove_line_items(&handle, vec![line_item_id.to_string()])
                .await?
        } else {
            self.service
                .update_line_items(
                    &handle,
                    vec![LineItemUpdate {
                        line_item_id: line_item_id.to_string(),
                        quantity,
                    }],
                )
                .await?
        };
        Ok(publish(&mut state, cart))
    }

    /// Removes a line item from the cart.
    pub async fn remove_item(&self, line_item_id: &str) -> CartResult<CartSnapshot> {
        let mut state = self.state.lock().await;
        let handle = ready_handle(&state)?;
        require_line_item(&state, line_item_id)?;
        debug!(line_item_id = %line_item_id, "remove_item");

        let cart = self
            .service
            .remove_line_items(&handle, vec![line_item_id.to_string()])
            .await?;
        Ok(publish(&mut state, cart))
    }

    /// Empties the cart (keeps the same handle).
    pub async fn clear_cart(&self) -> CartResult<CartSnapshot> {
        let mut state = self.state.lock().await;
        let current = match &*state {
            SessionState::Ready(snapshot) => snapshot.clone(),
            _ => return Err(CartError::NotReady),
        };
        if current.line_items.is_empty() {
            // Nothing to remove; republish the current snapshot.
            return Ok(current);
        }
        let line_item_ids: Vec<String> =
            current.line_items.iter().map(|l| l.id.clone()).collect();
        debug!(lines = line_item_ids.len(), "clear_cart");

        let cart = self
            .service
            .remove_line_items(&current.handle, line_item_ids)
            .await?;
        Ok(publish(&mut state, cart))
    }

    /// The checkout redirect URL — a pure read of the service-provided
    /// value; this coordinator performs no payment itself.
    pub async fn checkout_url(&self) -> CartResult<String> {
        let state = self.state.lock().await;
        match &*state {
            SessionState::Ready(snapshot) => Ok(snapshot.web_url.clone()),
            _ => Err(CartError::NotReady),
        }
    }

    /// Current snapshot, if the session is Ready.
    pub async fn snapshot(&self) -> Option<CartSnapshot> {
        let state = self.state.lock().await;
        match &*state {
            SessionState::Ready(snapshot) => Some(snapshot.clone()),
            _ => None,
        }
    }

    /// Current badge count; 0 before initialization.
    pub async fn item_count(&self) -> i64 {
        self.snapshot().await.map(|s| s.item_count).unwrap_or(0)
    }
}

/// Extracts the cart handle, or reports the caller error.
fn ready_handle(state: &SessionState) -> CartResult<String> {
    match state {
        SessionState::Ready(snapshot) => Ok(snapshot.handle.clone()),
        _ => Err(CartError::NotReady),
    }
}

/// Rejects mutations against a line item the snapshot does not contain.
fn require_line_item(state: &SessionState, line_item_id: &str) -> CartResult<()> {
    match state {
        SessionState::Ready(snapshot)
            if snapshot.line_items.iter().any(|l| l.id == line_item_id) =>
        {
            Ok(())
        }
        SessionState::Ready(_) => Err(CartError::LineItemNotFound(line_item_id.to_string())),
        _ => Err(CartError::NotReady),
    }
}

/// Replaces the cached snapshot with the service's reconciled cart and
/// returns the published view. Only ever called on a successful round trip.
fn publish(state: &mut SessionState, cart: RemoteCart) -> CartSnapshot {
    let snapshot = CartSnapshot::from(cart);
    debug!(item_count = snapshot.item_count, "cart reconciled");
    *state = SessionState::Ready(snapshot.clone());
    snapshot
}

// =============================================================================
// Unit Tests
// =============================================================================
