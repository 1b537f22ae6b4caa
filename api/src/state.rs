//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use shared::storage::{InMemoryObservationStore, ObservationStore};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds only the observation store; every request is otherwise stateless.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ObservationStore>,
}

impl AppState {
    /// Creates a new application state backed by `store`.
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self { store }
    }

    /// Creates a new application state with an empty in-memory store.
    ///
    /// This is useful for development and testing.
    #[must_use]
    pub fn with_in_memory_store() -> Self {
        Self::new(InMemoryObservationStore::new_shared())
    }

    /// Returns a reference to the observation store.
    #[must_use]
    pub fn store(&self) -> &dyn ObservationStore {
        self.store.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_in_memory_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Observation;

    #[test]
    fn test_app_state_with_in_memory_store() {
        let state = AppState::with_in_memory_store();

        state
            .store()
            .insert(Observation::now(18.0, 65.0, 1015.0))
            .unwrap();
        assert_eq!(state.store().count().unwrap(), 1);
    }

    #[test]
    fn test_app_state_clones_share_store() {
        let state = AppState::with_in_memory_store();
        let state2 = state.clone();

        state
            .store()
            .insert(Observation::now(18.0, 65.0, 1015.0))
            .unwrap();

        assert_eq!(state2.store().count().unwrap(), 1);
    }
}
