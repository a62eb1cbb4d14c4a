//! # Handle Store
//!
//! Persistence for the ONE piece of locally remembered state: the opaque
//! cart handle. A returning session inside the handle's validity window
//! resumes the same cart; everything else lives at the Checkout Service.
//!
//! In the browser build this is backed by local storage; here it is a
//! trait so the coordinator can be driven by the in-memory implementation
//! in tests and non-browser hosts.

use std::sync::Mutex;

// =============================================================================
// Handle Store Trait
// =============================================================================

/// Stores at most one opaque cart handle.
///
/// Implementations must be infallible best-effort: losing the handle only
/// costs the customer their in-progress cart, never correctness — the
/// coordinator creates a fresh cart when `load` returns nothing.
pub trait HandleStore: Send + Sync {
    /// Returns the remembered handle, if any.
    fn load(&self) -> Option<String>;

    /// Overwrites the remembered handle.
    fn save(&self, handle: &str);

    /// Forgets the remembered handle.
    fn clear(&self);
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// Process-local handle store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct InMemoryHandleStore {
    handle: Mutex<Option<String>>,
}

impl InMemoryHandleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already remembers a handle.
    pub fn with_handle(handle: &str) -> Self {
        InMemoryHandleStore {
            handle: Mutex::new(Some(handle.to_string())),
        }
    }
}

impl HandleStore for InMemoryHandleStore {
    fn load(&self) -> Option<String> {
        self.handle.lock().expect("handle store mutex poisoned").clone()
    }

    fn save(&self, handle: &str) {
        *self.handle.lock().expect("handle store mutex poisoned") = Some(handle.to_string());
    }

    fn clear(&self) {
        *self.handle.lock().expect("handle store mutex poisoned") = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
