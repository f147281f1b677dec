/// Shared application state
use refresher_core::{LibraryBackend, Refresher};
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Holds only the upstream backend, which is read-only for the life of the
/// process; handlers never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn LibraryBackend>,
    pub refresher: Refresher<dyn LibraryBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn LibraryBackend>) -> Self {
        let refresher = Refresher::new(Arc::clone(&backend));
        Self { backend, refresher }
    }
}
