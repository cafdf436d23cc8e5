use std::sync::Arc;

use visitmeter_core::{config::Config, store::VisitStore};

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The store is held as a trait object so tests can substitute in-memory
/// implementations for the MySQL backend.
pub struct AppState {
    pub store: Arc<dyn VisitStore>,

    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn VisitStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
