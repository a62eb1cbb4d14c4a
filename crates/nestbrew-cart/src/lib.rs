//! # nestbrew-cart: Cart/Session Coordination for the Nestbrew Storefront
//!
//! This crate maintains exactly one active cart per customer session,
//! backed by the external Checkout Service — the authoritative system of
//! record for line items, variants and the checkout redirect URL.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront UI                                                          │
//! │      │  add/update/remove/clear, checkout                               │
//! │      ▼                                                                  │
//! │  CartCoordinator ──────────► CheckoutService (external, authoritative)  │
//! │      │      ▲                      │                                    │
//! │      │      └── reconciled cart ◄──┘                                    │
//! │      ▼                                                                  │
//! │  snapshot + item count ──► republished to the UI                        │
//! │                                                                         │
//! │  HandleStore remembers the ONE opaque handle between sessions.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coordinator`] - The session state machine and mutation operations
//! - [`service`] - The consumed Checkout Service contract
//! - [`store`] - Handle persistence seam
//! - [`memory`] - In-memory Checkout Service for tests and local hosts
//! - [`error`] - Coordinator error taxonomy
//!
//! ## Guarantees
//!
//! 1. Mutations are serialized per session: no stale service response can
//!    overwrite a newer one
//! 2. A failed mutation leaves the cached snapshot untouched (retryable)
//! 3. A stale or completed remembered handle is replaced transparently
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use nestbrew_cart::coordinator::CartCoordinator;
//! use nestbrew_cart::memory::InMemoryCheckout;
//! use nestbrew_cart::store::InMemoryHandleStore;
//!
//! # async fn demo() -> Result<(), nestbrew_cart::error::CartError> {
//! let coordinator = CartCoordinator::new(
//!     Arc::new(InMemoryCheckout::new()),
//!     Arc::new(InMemoryHandleStore::new()),
//! );
//!
//! coordinator.initialize().await?;
//! let snapshot = coordinator.add_item("gid://variant/41", 2, vec![]).await?;
//! assert_eq!(snapshot.item_count, 2);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coordinator;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coordinator::{CartCoordinator, CartSnapshot};
pub use error::{CartError, CartResult};
pub use service::{
    CartLookup, CheckoutError, CheckoutService, CustomAttribute, LineItemInput, LineItemUpdate,
    RemoteCart, RemoteLineItem,
};
pub use store::{HandleStore, InMemoryHandleStore};
