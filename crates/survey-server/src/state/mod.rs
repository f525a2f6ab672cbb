//! Shared application state.

pub mod store;

use crate::persistence::EstateStore;

pub use store::MemoryStore;

/// Application state handed to every handler.
///
/// The storage collaborator is injected here; the planning core never sees it.
pub struct AppState<S> {
    store: S,
}

impl<S: EstateStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
